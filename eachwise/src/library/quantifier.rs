use crate::error;
use crate::pattern::Matcher;
use crate::traverse::finish;
use crate::traverse::Stop;
use crate::traverse::Traverse;
use crate::value::Value;

pub(crate) fn all(source: &dyn Traverse, matcher: &Matcher<'_, '_>) -> error::Result<Value> {
    let mut result = true;
    let flow = source.traverse(&mut |args| {
        if !matcher.matches(args)? {
            result = false;
            return Err(Stop::Done);
        }
        Ok(())
    });
    finish(flow, || result.into())
}

pub(crate) fn any(source: &dyn Traverse, matcher: &Matcher<'_, '_>) -> error::Result<Value> {
    let mut result = false;
    let flow = source.traverse(&mut |args| {
        if matcher.matches(args)? {
            result = true;
            return Err(Stop::Done);
        }
        Ok(())
    });
    finish(flow, || result.into())
}

pub(crate) fn none(source: &dyn Traverse, matcher: &Matcher<'_, '_>) -> error::Result<Value> {
    let mut result = true;
    let flow = source.traverse(&mut |args| {
        if matcher.matches(args)? {
            result = false;
            return Err(Stop::Done);
        }
        Ok(())
    });
    finish(flow, || result.into())
}

pub(crate) fn one(source: &dyn Traverse, matcher: &Matcher<'_, '_>) -> error::Result<Value> {
    let mut count = 0usize;
    let flow = source.traverse(&mut |args| {
        if matcher.matches(args)? {
            count += 1;
            if count > 1 {
                return Err(Stop::Done);
            }
        }
        Ok(())
    });
    finish(flow, || (count == 1).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::testing::ints;
    use crate::library::testing::Naturals;
    use crate::pattern::Pattern;
    use crate::traverse::Block;
    use crate::value::Kind;

    #[test]
    fn test_all_short_circuits() {
        let mut seen = 0;
        let block = Block::unary(|v| {
            seen += 1;
            Ok((v.as_integer() < Some(2)).into())
        });
        let result = all(&ints(&[1, 2, 3]), &Matcher::Predicate(&block));
        drop(block);
        assert_eq!(result, Ok(false.into()));
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_any_on_unbounded_source() {
        let block = Block::unary(|v| Ok((v.as_integer() == Some(10)).into()));
        assert_eq!(any(&Naturals, &Matcher::Predicate(&block)), Ok(true.into()));
    }

    #[test]
    fn test_none_with_pattern() {
        let pattern = Pattern::from(Kind::String);
        assert_eq!(
            none(&ints(&[1, 2]), &Matcher::Pattern(&pattern)),
            Ok(true.into())
        );
    }

    #[test]
    fn test_one_stops_at_second_match() {
        let block = Block::unary(|v| Ok((v.as_integer().unwrap() % 2 == 0).into()));
        assert_eq!(one(&Naturals, &Matcher::Predicate(&block)), Ok(false.into()));
        assert_eq!(
            one(&ints(&[1, 2, 3]), &Matcher::Predicate(&block)),
            Ok(true.into())
        );
    }

    #[test]
    fn test_truthy_without_block() {
        let items = vec![Value::Nil, Value::from(1)];
        assert_eq!(all(&items, &Matcher::Truthy), Ok(false.into()));
        assert_eq!(any(&items, &Matcher::Truthy), Ok(true.into()));
        assert_eq!(one(&items, &Matcher::Truthy), Ok(true.into()));
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(all(&Value::Nil, &Matcher::Truthy), Ok(true.into()));
        assert_eq!(any(&Value::Nil, &Matcher::Truthy), Ok(false.into()));
        assert_eq!(none(&Value::Nil, &Matcher::Truthy), Ok(true.into()));
        assert_eq!(one(&Value::Nil, &Matcher::Truthy), Ok(false.into()));
    }

    #[test]
    fn test_break_becomes_the_result() {
        let block = Block::unary(|_| Err(Stop::Break("early".into())));
        assert_eq!(
            all(&ints(&[1]), &Matcher::Predicate(&block)),
            Ok("early".into())
        );
    }
}
