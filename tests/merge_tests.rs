//! Integration tests for merging and sequential task execution through the
//! public API, using documents shaped like real option files.

use scene_compose::merge::{merge, merge_all, merge_deep, merge_shallow};
use scene_compose::queue::{TaskQueue, run_sequential};
use scene_compose::value::ConfigValue;
use serde_json::json;
use std::sync::{Arc, Mutex};

fn value(v: serde_json::Value) -> ConfigValue {
    ConfigValue::from(v)
}

mod merging {
    use super::*;

    #[test]
    fn layered_option_files() {
        let builtin = value(json!({
            "layer": "default",
            "style": {"colour": "#00ff00", "width": 2, "dash": [4, 2]},
        }));
        let project = value(json!({"style": {"width": 3}}));
        let caller = value(json!({"name": "fence", "style": {"dash": [8]}}));

        let merged = merge_all(true, [&builtin, &project, &caller]);

        assert_eq!(
            merged.to_json(),
            json!({
                "layer": "default",
                "style": {"colour": "#00ff00", "width": 3, "dash": [8, 2]},
                "name": "fence",
            })
        );
        // Inputs are left as they were
        assert_eq!(project.to_json(), json!({"style": {"width": 3}}));
    }

    #[test]
    fn shallow_and_deep_differ_only_in_nesting() {
        let base = value(json!({"a": 1, "nested": {"x": 1, "y": 2}}));
        let patch = value(json!({"nested": {"y": 3}}));

        let mut shallow = ConfigValue::object();
        merge_shallow(&mut shallow, &[&base, &patch]);
        let mut deep = ConfigValue::object();
        merge_deep(&mut deep, &[&base, &patch]);

        assert_eq!(shallow.to_json(), json!({"a": 1, "nested": {"y": 3}}));
        assert_eq!(deep.to_json(), json!({"a": 1, "nested": {"x": 1, "y": 3}}));
    }

    #[test]
    fn flag_selects_entry_point() {
        let source = value(json!({"x": {"a": 1}}));
        let mut by_flag = value(json!({"x": {"b": 2}}));
        let mut direct = by_flag.clone();

        merge(true, &mut by_flag, &[&source]);
        merge_deep(&mut direct, &[&source]);

        assert_eq!(by_flag, direct);
        assert_eq!(direct.to_json(), json!({"x": {"b": 2, "a": 1}}));
    }

    #[test]
    fn null_clears_but_absent_keeps() {
        let mut target = value(json!({"icon": "pin.png", "text": "Tower"}));
        let mut patch = value(json!({"icon": null}));
        patch.insert("text", ConfigValue::Undefined);

        merge_deep(&mut target, &[&patch]);

        assert_eq!(target.to_json(), json!({"icon": null, "text": "Tower"}));
    }

    #[test]
    fn parsed_yaml_merges_like_json() {
        let yaml: ConfigValue = serde_yaml::from_str("points: [[0, 0, 0], [1, 1, 0]]\n").unwrap();
        let json_patch = value(json!({"points": [[5, 5, 5]]}));

        let merged = merge_all(true, [&yaml, &json_patch]);

        assert_eq!(merged.to_json(), json!({"points": [[5, 5, 5], [1, 1, 0]]}));
    }
}

mod sequencing {
    use super::*;

    #[tokio::test]
    async fn merged_results_collected_in_order() {
        let layers = vec![
            value(json!({"a": 1})),
            value(json!({"b": 2})),
            value(json!({"a": 3})),
        ];
        let acc = Arc::new(Mutex::new(ConfigValue::object()));

        let tasks: Vec<_> = layers
            .into_iter()
            .map(|layer| {
                let acc = Arc::clone(&acc);
                move || {
                    let acc = Arc::clone(&acc);
                    let layer = layer.clone();
                    async move {
                        let mut acc = acc.lock().unwrap();
                        merge_deep(&mut acc, &[&layer]);
                        Ok::<_, String>(acc.len())
                    }
                }
            })
            .collect();

        assert_eq!(run_sequential(tasks).await.unwrap(), vec![1, 2, 2]);
        assert_eq!(acc.lock().unwrap().to_json(), json!({"a": 3, "b": 2}));
    }

    #[tokio::test]
    async fn failure_surfaces_unchanged() {
        let invoked = Arc::new(Mutex::new(Vec::new()));
        let mut queue = TaskQueue::new();
        for step in ["load", "validate", "apply"] {
            let invoked = Arc::clone(&invoked);
            queue.push(move || {
                invoked.lock().unwrap().push(step);
                async move {
                    if step == "validate" {
                        Err(format!("{step} failed"))
                    } else {
                        Ok(step)
                    }
                }
            });
        }

        assert_eq!(queue.run().await, Err("validate failed".to_string()));
        assert_eq!(*invoked.lock().unwrap(), vec!["load", "validate"]);
    }
}
