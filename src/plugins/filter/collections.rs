//! Collection filters for templates.
//!
//! # Available Filters
//!
//! - `shuffle`: Return the items of a sequence (or the values of a map) in
//!   random order
//!
//! # Examples
//!
//! ```jinja2
//! {% for i in [1, 2, 3] | shuffle %}{{ i }}{% endfor %}
//! ```

use minijinja::value::ValueKind;
use minijinja::{Environment, Error, Value};
use rand::seq::SliceRandom;
use rand::Rng;

/// Register all collection filters with the given environment.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("shuffle", shuffle_filter);
}

fn shuffle_filter(value: Value) -> Result<Value, Error> {
    shuffle(&value, &mut rand::thread_rng())
}

/// Collects `value` into a list and shuffles it with `rng`.
///
/// Maps contribute their values, not their keys.
pub fn shuffle<R: Rng + ?Sized>(value: &Value, rng: &mut R) -> Result<Value, Error> {
    let mut items: Vec<Value> = if value.kind() == ValueKind::Map {
        value
            .try_iter()?
            .map(|key| value.get_item(&key))
            .collect::<Result<_, _>>()?
    } else {
        value.try_iter()?.collect()
    };

    items.shuffle(rng);
    Ok(Value::from(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shuffle_keeps_items() {
        let mut rng = StdRng::seed_from_u64(5);
        let input = Value::from(vec![1, 2, 3, 4, 5]);
        let shuffled = shuffle(&input, &mut rng).unwrap();
        let mut items: Vec<i64> = shuffled
            .try_iter()
            .unwrap()
            .map(|v| i64::try_from(v).unwrap())
            .collect();
        items.sort_unstable();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_shuffle_map_values() {
        let mut rng = StdRng::seed_from_u64(5);
        let input = Value::from_iter([("a", 1), ("b", 2)]);
        let shuffled = shuffle(&input, &mut rng).unwrap();
        assert_eq!(shuffled.len(), Some(2));
        let sum: i64 = shuffled
            .try_iter()
            .unwrap()
            .map(|v| i64::try_from(v).unwrap())
            .sum();
        assert_eq!(sum, 3);
    }

    #[test]
    fn test_shuffle_rejects_scalars() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(shuffle(&Value::from(42), &mut rng).is_err());
    }
}
