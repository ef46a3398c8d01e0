use crate::error;
use crate::traverse::resolve;
use crate::traverse::settle;
use crate::traverse::Block;
use crate::traverse::Fallback;
use crate::traverse::Stop;
use crate::traverse::Traverse;
use crate::value::Value;

pub(crate) fn detect(
    source: &dyn Traverse,
    fallback: Option<&Fallback>,
    block: &Block<'_>,
) -> error::Result<Value> {
    let mut found = None;
    let flow = source.traverse(&mut |args| {
        if block.call(args)?.is_truthy() {
            found = Some(Value::pack(args));
            return Err(Stop::Done);
        }
        Ok(())
    });
    if let Some(value) = settle(flow)? {
        return Ok(value);
    }
    match (found, fallback) {
        (Some(value), _) => Ok(value),
        (None, Some(fallback)) => resolve(fallback.call()),
        (None, None) => Ok(Value::Nil),
    }
}

/// The position of the first match, by callback if given, by equality to
/// the value otherwise.
pub(crate) fn find_index(
    source: &dyn Traverse,
    value: Option<&Value>,
    block: Option<&Block<'_>>,
) -> error::Result<Value> {
    let mut index = 0usize;
    let mut found = None;
    let flow = source.traverse(&mut |args| {
        let hit = match (block, value) {
            (Some(block), _) => block.call(args)?.is_truthy(),
            (None, Some(value)) => value.loose_eq(&Value::pack(args)),
            (None, None) => return Err(error::Error::ArgumentError.into()),
        };
        if hit {
            found = Some(index);
            return Err(Stop::Done);
        }
        index += 1;
        Ok(())
    });
    Ok(settle(flow)?.unwrap_or_else(|| found.into()))
}

pub(crate) fn include(source: &dyn Traverse, value: &Value) -> error::Result<Value> {
    let mut result = false;
    let flow = source.traverse(&mut |args| {
        if value.loose_eq(&Value::pack(args)) {
            result = true;
            return Err(Stop::Done);
        }
        Ok(())
    });
    Ok(settle(flow)?.unwrap_or_else(|| result.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::testing::ints;
    use crate::library::testing::Naturals;

    fn even() -> Block<'static> {
        Block::unary(|v| Ok((v.as_integer().unwrap() % 2 == 0).into()))
    }

    #[test]
    fn test_detect() {
        assert_eq!(detect(&ints(&[1, 3, 4, 6]), None, &even()), Ok(4.into()));
        assert_eq!(detect(&ints(&[1, 3]), None, &even()), Ok(Value::Nil));
    }

    #[test]
    fn test_detect_fallback() {
        let fallback = Fallback::new(|| Ok("none".into()));
        assert_eq!(
            detect(&ints(&[1, 3]), Some(&fallback), &even()),
            Ok("none".into())
        );
        // not invoked when something is found
        let fallback = Fallback::new(|| Err(error::Error::TypeError.into()));
        assert_eq!(detect(&ints(&[2]), Some(&fallback), &even()), Ok(2.into()));
    }

    #[test]
    fn test_detect_unbounded() {
        let block = Block::unary(|v| Ok((v.as_integer() > Some(41)).into()));
        assert_eq!(detect(&Naturals, None, &block), Ok(42.into()));
    }

    #[test]
    fn test_find_index() {
        let items = ints(&[5, 6, 7]);
        assert_eq!(find_index(&items, Some(&7.into()), None), Ok(2.into()));
        assert_eq!(find_index(&items, Some(&9.into()), None), Ok(Value::Nil));
        assert_eq!(find_index(&items, None, Some(&even())), Ok(1.into()));
    }

    #[test]
    fn test_find_index_block_wins() {
        let items = ints(&[5, 6, 7]);
        assert_eq!(
            find_index(&items, Some(&5.into()), Some(&even())),
            Ok(1.into())
        );
    }

    #[test]
    fn test_include() {
        let items = vec![Value::from(1), Value::from("a")];
        assert_eq!(include(&items, &1.0.into()), Ok(true.into()));
        assert_eq!(include(&items, &"b".into()), Ok(false.into()));
        assert_eq!(include(&Naturals, &100.into()), Ok(true.into()));
    }
}
