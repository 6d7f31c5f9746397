//! Integration tests for applying scene plans.
//!
//! Every test drives `apply_scene` against a `DryRunHost`, whose call log shows
//! exactly what a real host would have been asked to do and in which order.

use scene_compose::error::{HostError, SceneError};
use scene_compose::follow::{NodePath, NodePathRegistry};
use scene_compose::host::{DryRunHost, HostCall, SceneHost};
use scene_compose::lighting::LightingMode;
use scene_compose::options::{OptionDefaults, OptionsBuilder, SceneObject, Vector3};
use scene_compose::scene::{ScenePlan, apply_scene};
use scene_compose::value::ConfigValue;
use serde_json::json;
use std::sync::Arc;

const PLAN: &str = r#"
lighting: night
pois:
  - {name: tower, position: [0, 0, 40]}
  - {name: gate, position: [10, 0, 0], fontColour: red}
lines:
  - {name: fence, points: [[0, 0, 0], [10, 0, 0]]}
polygons:
  - {name: yard, points: [[0, 0, 0], [10, 0, 0], [10, 10, 0]]}
models:
  - {name: truck, mesh: truck.glb, position: [5, 5, 0]}
paths:
  - name: delivery
    node: truck
    waypoints: [[5, 5, 0], [0, 10, 0]]
follow: [delivery]
"#;

struct Fixture {
    builder: OptionsBuilder,
    registry: NodePathRegistry,
    lighting: LightingMode,
}

impl Fixture {
    fn new() -> Self {
        Self::with_defaults(OptionDefaults::default())
    }

    fn with_defaults(defaults: OptionDefaults) -> Self {
        Self {
            builder: OptionsBuilder::new(defaults),
            registry: NodePathRegistry::new(),
            lighting: LightingMode::Day,
        }
    }

    async fn apply(
        &mut self,
        host: &Arc<DryRunHost>,
        plan: &ScenePlan,
    ) -> Result<scene_compose::scene::SceneReport, SceneError> {
        let host: Arc<dyn SceneHost> = host.clone();
        apply_scene(
            host,
            &self.builder,
            &mut self.registry,
            &mut self.lighting,
            plan,
        )
        .await
    }
}

fn created_names(calls: &[HostCall]) -> Vec<String> {
    calls
        .iter()
        .filter_map(|call| match call {
            HostCall::Create { object, .. } => Some(object.name().to_string()),
            _ => None,
        })
        .collect()
}

mod ordering {
    use super::*;

    #[tokio::test]
    async fn objects_created_in_plan_order() {
        let host = Arc::new(DryRunHost::new());
        let plan = ScenePlan::from_yaml(PLAN).unwrap();
        let mut fixture = Fixture::new();

        let report = fixture.apply(&host, &plan).await.expect("plan should apply");

        let calls = host.calls();
        assert_eq!(
            calls.first(),
            Some(&HostCall::SetLighting {
                mode: LightingMode::Night
            })
        );
        assert_eq!(
            created_names(&calls),
            vec!["tower", "gate", "fence", "yard", "truck"]
        );
        assert_eq!(
            calls.last(),
            Some(&HostCall::FollowNode {
                path: "delivery".into(),
                node: "truck".into()
            })
        );

        let ids: Vec<u64> = report.handles.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(report.followed, vec!["delivery"]);
        assert_eq!(report.lighting, LightingMode::Night);
        assert_eq!(fixture.lighting, LightingMode::Night);
    }

    #[tokio::test]
    async fn lighting_unchanged_skips_host_call() {
        let host = Arc::new(DryRunHost::new());
        let plan = ScenePlan::from_yaml("lighting: day\npois: [{name: p, position: [0, 0, 0]}]").unwrap();
        let mut fixture = Fixture::new();

        fixture.apply(&host, &plan).await.unwrap();

        let calls = host.calls();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], HostCall::Create { .. }));
    }

    #[tokio::test]
    async fn empty_plan_touches_nothing() {
        let host = Arc::new(DryRunHost::new());
        let report = Fixture::new()
            .apply(&host, &ScenePlan::default())
            .await
            .unwrap();

        assert!(report.handles.is_empty());
        assert!(report.followed.is_empty());
        assert!(host.calls().is_empty());
    }
}

mod fail_fast {
    use super::*;

    #[tokio::test]
    async fn host_rejection_stops_later_objects() {
        let host = Arc::new(DryRunHost::new().fail_on("fence"));
        let plan = ScenePlan::from_yaml(PLAN).unwrap();

        let err = Fixture::new().apply(&host, &plan).await.unwrap_err();

        match err {
            SceneError::Host(HostError::Rejected {
                operation, target, ..
            }) => {
                assert_eq!(operation, "create_line");
                assert_eq!(target, "fence");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Objects before the rejection were created, nothing after it
        assert_eq!(created_names(&host.calls()), vec!["tower", "gate"]);
        assert!(
            !host
                .calls()
                .iter()
                .any(|call| matches!(call, HostCall::FollowNode { .. }))
        );
    }

    #[tokio::test]
    async fn invalid_object_rejected_before_any_host_call() {
        let host = Arc::new(DryRunHost::new());
        let mut plan = ScenePlan::from_yaml(PLAN).unwrap();
        // A line with a single point is invalid
        plan.lines
            .push(ConfigValue::from(json!({"name": "stub", "points": [[0, 0, 0]]})));

        let err = Fixture::new().apply(&host, &plan).await.unwrap_err();

        assert!(matches!(err, SceneError::Options(_)));
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_follow_path_rejected_before_any_host_call() {
        let host = Arc::new(DryRunHost::new());
        let mut plan = ScenePlan::from_yaml(PLAN).unwrap();
        plan.follow.push("missing".to_string());

        let err = Fixture::new().apply(&host, &plan).await.unwrap_err();

        assert!(matches!(err, SceneError::UnknownPath(ref name) if name == "missing"));
        assert_eq!(err.to_string(), "no node path named 'missing' is registered");
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn unavailable_host_fails_on_first_call() {
        let host = Arc::new(DryRunHost::new().unavailable());
        let plan = ScenePlan::from_yaml(PLAN).unwrap();
        let mut fixture = Fixture::new();

        let err = fixture.apply(&host, &plan).await.unwrap_err();

        assert!(matches!(err, SceneError::Host(HostError::Unavailable(_))));
        // The failed lighting switch leaves the caller's state untouched
        assert_eq!(fixture.lighting, LightingMode::Day);
    }
}

mod registry {
    use super::*;

    #[tokio::test]
    async fn paths_registered_earlier_can_be_followed_later() {
        let host = Arc::new(DryRunHost::new());
        let mut fixture = Fixture::new();
        fixture.registry.add(NodePath::new(
            "loop",
            "drone",
            vec![Vector3::new(0.0, 0.0, 50.0), Vector3::new(10.0, 0.0, 50.0)],
        ));

        let plan = ScenePlan::from_yaml("follow: [loop]").unwrap();
        let report = fixture.apply(&host, &plan).await.unwrap();

        assert_eq!(report.followed, vec!["loop"]);
        assert_eq!(
            host.calls(),
            vec![HostCall::FollowNode {
                path: "loop".into(),
                node: "drone".into()
            }]
        );
    }

    #[tokio::test]
    async fn plan_paths_stay_registered() {
        let host = Arc::new(DryRunHost::new());
        let plan = ScenePlan::from_yaml(PLAN).unwrap();
        let mut fixture = Fixture::new();

        fixture.apply(&host, &plan).await.unwrap();

        assert!(fixture.registry.contains("delivery"));
        assert_eq!(fixture.registry.len(), 1);
    }
}

mod defaults {
    use super::*;

    #[tokio::test]
    async fn configured_defaults_apply_under_caller_options() {
        let defaults: OptionDefaults = serde_json::from_value(json!({
            "poi": {"layer": "labels", "fontSize": 18, "iconSize": [16, 16]}
        }))
        .unwrap();
        let host = Arc::new(DryRunHost::new());
        let plan = ScenePlan::from_yaml(
            r#"
pois:
  - {name: a, position: [0, 0, 0]}
  - {name: b, position: [1, 0, 0], fontSize: 24}
"#,
        )
        .unwrap();

        Fixture::with_defaults(defaults)
            .apply(&host, &plan)
            .await
            .unwrap();

        let pois: Vec<_> = host
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Create {
                    object: SceneObject::Poi(poi),
                    ..
                } => Some(poi),
                _ => None,
            })
            .collect();
        assert_eq!(pois.len(), 2);
        assert_eq!(pois[0].layer, "labels");
        assert_eq!(pois[0].font_size, 18.0);
        assert_eq!(pois[1].font_size, 24.0);
        assert_eq!(pois[1].icon_size.x, 16.0);
    }
}
