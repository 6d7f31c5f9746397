//! Shallow and deep merging of option objects.
//!
//! Sources are applied left to right onto a target, which is mutated in place
//! and returned for chaining. Semantics follow the classic `extend` helper:
//! - `Undefined` in a source never overwrites; `Null` does.
//! - In deep mode, object and array source values are merged recursively.
//!   Arrays merge index by index, so `[1, 2]` merged with `[9]` is `[9, 2]`.
//! - A source value that is the target container itself is skipped.
//! - Sources are never modified.

use crate::value::ConfigValue;

/// Merge `sources` into `target`, replacing values key by key.
///
/// # Example
/// ```
/// use serde_json::json;
/// use scene_compose::merge::merge_shallow;
/// use scene_compose::value::ConfigValue;
///
/// let mut target = ConfigValue::from(json!({"icon": "pin.png", "size": 12}));
/// let overlay = ConfigValue::from(json!({"size": 16}));
/// merge_shallow(&mut target, &[&overlay]);
/// assert_eq!(target.to_json(), json!({"icon": "pin.png", "size": 16}));
/// ```
pub fn merge_shallow<'t>(
    target: &'t mut ConfigValue,
    sources: &[&ConfigValue],
) -> &'t mut ConfigValue {
    merge(false, target, sources)
}

/// Merge `sources` into `target`, recursing into nested objects and arrays.
///
/// # Example
/// ```
/// use serde_json::json;
/// use scene_compose::merge::merge_deep;
/// use scene_compose::value::ConfigValue;
///
/// let mut target = ConfigValue::from(json!({"font": {"size": 12, "colour": "#fff"}}));
/// let overlay = ConfigValue::from(json!({"font": {"size": 16}}));
/// merge_deep(&mut target, &[&overlay]);
/// assert_eq!(target.to_json(), json!({"font": {"size": 16, "colour": "#fff"}}));
/// ```
pub fn merge_deep<'t>(target: &'t mut ConfigValue, sources: &[&ConfigValue]) -> &'t mut ConfigValue {
    merge(true, target, sources)
}

/// Merge with the mode given as data.
///
/// A target that is neither an object nor an array is replaced with an empty
/// object first. Sources that are not containers contribute nothing.
pub fn merge<'t>(
    deep: bool,
    target: &'t mut ConfigValue,
    sources: &[&ConfigValue],
) -> &'t mut ConfigValue {
    if !target.is_container() {
        *target = ConfigValue::object();
    }
    for source in sources {
        merge_source(deep, target, source);
    }
    target
}

/// Fold all `sources` into a fresh object.
pub fn merge_all<'a>(deep: bool, sources: impl IntoIterator<Item = &'a ConfigValue>) -> ConfigValue {
    let sources: Vec<&ConfigValue> = sources.into_iter().collect();
    let mut target = ConfigValue::object();
    merge(deep, &mut target, &sources);
    target
}

/// Key into either kind of container.
#[derive(Debug, Clone, Copy)]
enum Slot<'k> {
    Name(&'k str),
    Index(usize),
}

fn merge_source(deep: bool, target: &mut ConfigValue, source: &ConfigValue) {
    // Captured before any copy-on-write can move the target's storage.
    let Some(identity) = target.container_ptr() else {
        return;
    };

    match source {
        ConfigValue::Object(map) => {
            for (key, copy) in map.iter() {
                assign(deep, target, identity, Slot::Name(key), copy);
            }
        }
        ConfigValue::Array(items) => {
            for (index, copy) in items.iter().enumerate() {
                assign(deep, target, identity, Slot::Index(index), copy);
            }
        }
        _ => {}
    }
}

fn assign(deep: bool, target: &mut ConfigValue, identity: *const (), slot: Slot<'_>, copy: &ConfigValue) {
    if copy.container_ptr() == Some(identity) {
        return;
    }

    if deep && copy.is_container() {
        let src = take_slot(target, slot);
        let mut clone = match (copy, src) {
            (ConfigValue::Array(_), src @ ConfigValue::Array(_)) => src,
            (ConfigValue::Array(_), _) => ConfigValue::array(),
            (_, src @ ConfigValue::Object(_)) => src,
            _ => ConfigValue::object(),
        };
        merge_source(deep, &mut clone, copy);
        put_slot(target, slot, clone);
    } else if !copy.is_undefined() {
        put_slot(target, slot, copy.clone());
    }
}

/// Remove the value at `slot` for in-place reuse, leaving `Undefined` behind.
fn take_slot(target: &mut ConfigValue, slot: Slot<'_>) -> ConfigValue {
    match target {
        ConfigValue::Object(_) => {
            let key = slot_key(slot);
            target
                .object_mut()
                .and_then(|map| map.get_mut(&*key))
                .map(std::mem::take)
                .unwrap_or_default()
        }
        ConfigValue::Array(_) => slot_index(slot)
            .and_then(|index| {
                target
                    .array_mut()
                    .and_then(|items| items.get_mut(index))
                    .map(std::mem::take)
            })
            .unwrap_or_default(),
        _ => ConfigValue::Undefined,
    }
}

fn put_slot(target: &mut ConfigValue, slot: Slot<'_>, value: ConfigValue) {
    match target {
        ConfigValue::Object(_) => {
            let key = slot_key(slot).into_owned();
            if let Some(map) = target.object_mut() {
                map.insert(key, value);
            }
        }
        ConfigValue::Array(_) => {
            // Non-index names have nowhere to live on an array.
            let Some(index) = slot_index(slot) else {
                return;
            };
            if let Some(items) = target.array_mut() {
                if index >= items.len() {
                    items.resize(index + 1, ConfigValue::Undefined);
                }
                items[index] = value;
            }
        }
        _ => {}
    }
}

fn slot_key(slot: Slot<'_>) -> std::borrow::Cow<'_, str> {
    match slot {
        Slot::Name(name) => std::borrow::Cow::Borrowed(name),
        Slot::Index(index) => std::borrow::Cow::Owned(index.to_string()),
    }
}

fn slot_index(slot: Slot<'_>) -> Option<usize> {
    match slot {
        Slot::Name(name) => name.parse().ok(),
        Slot::Index(index) => Some(index),
    }
}
