//! End-to-end behavior of composed adapters, as a reconcile engine sees them

use std::collections::BTreeMap;
use std::sync::Arc;

use controlplane_component::{
    adapt_pod_disruption_budget, disable_if_annotation_exist, enable_for_platform,
    keep_manifest_if_annotation_exists, set_hosted_cluster_annotation, with_adapt_function,
    with_predicate, AdapterOption, ComponentError, GenericAdapter, ManifestAction,
    WorkloadContext,
};
use hcp_common::crd::{
    AvailabilityPolicy, HostedControlPlane, HostedControlPlaneSpec, PlatformSpec, PlatformType,
};
use hcp_common::{DISABLE_PKI_RECONCILIATION_ANNOTATION, HOSTED_CLUSTER_ANNOTATION};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::api::policy::v1::PodDisruptionBudget;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

fn control_plane(
    policy: AvailabilityPolicy,
    platform: PlatformType,
    annotations: &[(&str, &str)],
) -> HostedControlPlane {
    let mut hcp = HostedControlPlane::new(
        "example",
        HostedControlPlaneSpec {
            platform: PlatformSpec::new(platform),
            controller_availability_policy: policy,
            ..Default::default()
        },
    );
    hcp.metadata.namespace = Some("clusters-example".to_string());
    hcp.metadata.annotations = Some(
        annotations
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    );
    hcp
}

fn meta(name: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some("clusters-example".to_string()),
        ..Default::default()
    }
}

/// Story: a PDB adapter combining threshold tuning with annotation sync
/// observes both mutations, because adapt options chain.
#[test]
fn story_pdb_gets_thresholds_and_hosted_cluster_annotation() {
    let adapter = GenericAdapter::new([
        adapt_pod_disruption_budget(),
        set_hosted_cluster_annotation(),
    ]);
    let ctx = WorkloadContext::new(control_plane(
        AvailabilityPolicy::SingleReplica,
        PlatformType::Aws,
        &[(HOSTED_CLUSTER_ANNOTATION, "clusters/example")],
    ));

    let pdb = PodDisruptionBudget {
        metadata: meta("etcd"),
        ..Default::default()
    };
    let pdb = match adapter.reconcile(&ctx, pdb).unwrap() {
        ManifestAction::Apply(pdb) => pdb,
        other => panic!("expected apply, got {other:?}"),
    };

    let spec = pdb.spec.unwrap();
    assert_eq!(spec.min_available, Some(IntOrString::Int(1)));
    assert_eq!(spec.max_unavailable, None);
    assert_eq!(
        pdb.metadata.annotations.unwrap()[HOSTED_CLUSTER_ANNOTATION],
        "clusters/example"
    );
}

/// Story: with PKI reconciliation disabled, user-provided Secrets are neither
/// overwritten nor deleted.
#[test]
fn story_pki_annotation_protects_user_secrets() {
    let overwrite = with_adapt_function(|_: &WorkloadContext, secret: &mut Secret| {
        secret.string_data = Some(BTreeMap::from([(
            "tls.key".to_string(),
            "generated".to_string(),
        )]));
        Ok(())
    });
    let adapter = GenericAdapter::new([
        disable_if_annotation_exist(DISABLE_PKI_RECONCILIATION_ANNOTATION),
        keep_manifest_if_annotation_exists(DISABLE_PKI_RECONCILIATION_ANNOTATION),
        overwrite,
    ]);

    let disabled = WorkloadContext::new(control_plane(
        AvailabilityPolicy::HighlyAvailable,
        PlatformType::Aws,
        &[(DISABLE_PKI_RECONCILIATION_ANNOTATION, "true")],
    ));
    let secret = Secret {
        metadata: meta("root-ca"),
        ..Default::default()
    };
    assert_eq!(
        adapter.reconcile(&disabled, secret.clone()).unwrap(),
        ManifestAction::Keep
    );

    let enabled = WorkloadContext::new(control_plane(
        AvailabilityPolicy::HighlyAvailable,
        PlatformType::Aws,
        &[],
    ));
    assert!(adapter.reconcile(&enabled, secret).unwrap().is_apply());
}

/// Story: the last predicate wins; options do not AND together.
#[test]
fn story_predicates_are_last_write_wins() {
    let adapter = GenericAdapter::<Secret>::new([
        with_predicate(|_: &WorkloadContext| true),
        with_predicate(|_: &WorkloadContext| false),
    ]);
    let ctx = WorkloadContext::new(control_plane(
        AvailabilityPolicy::SingleReplica,
        PlatformType::Aws,
        &[],
    ));

    assert!(!adapter.predicate(&ctx));
    assert_eq!(
        adapter
            .reconcile(
                &ctx,
                Secret {
                    metadata: meta("s"),
                    ..Default::default()
                }
            )
            .unwrap(),
        ManifestAction::Delete
    );
}

/// Story: callers wanting a conjunction write it in one predicate.
#[test]
fn story_conjunction_lives_in_one_predicate() {
    let annotation = "example.com/skip";
    let both: AdapterOption<Secret> = with_predicate(move |ctx: &WorkloadContext| {
        ctx.platform_type() == PlatformType::KubeVirt && !ctx.has_annotation(annotation)
    });
    let adapter = GenericAdapter::new([both]);

    let kubevirt = |annotations: &[(&str, &str)]| {
        WorkloadContext::new(control_plane(
            AvailabilityPolicy::SingleReplica,
            PlatformType::KubeVirt,
            annotations,
        ))
    };
    assert!(adapter.predicate(&kubevirt(&[])));
    assert!(!adapter.predicate(&kubevirt(&[(annotation, "")])));
    assert!(!adapter.predicate(&WorkloadContext::new(control_plane(
        AvailabilityPolicy::SingleReplica,
        PlatformType::Aws,
        &[],
    ))));
}

/// Story: an adapter built once serves concurrent cycles for different
/// control planes.
#[test]
fn story_one_adapter_serves_concurrent_cycles() {
    let adapter = Arc::new(GenericAdapter::new([
        enable_for_platform(PlatformType::Aws),
        adapt_pod_disruption_budget(),
    ]));

    let cases = [
        (PlatformType::Aws, AvailabilityPolicy::SingleReplica),
        (PlatformType::Aws, AvailabilityPolicy::HighlyAvailable),
        (PlatformType::Azure, AvailabilityPolicy::HighlyAvailable),
    ];

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = cases
            .iter()
            .map(|&(platform, policy)| {
                let adapter = Arc::clone(&adapter);
                scope.spawn(move || {
                    let ctx = WorkloadContext::new(control_plane(policy, platform, &[]));
                    let pdb = PodDisruptionBudget {
                        metadata: meta("kube-apiserver"),
                        ..Default::default()
                    };
                    adapter.reconcile(&ctx, pdb).unwrap()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("reconcile thread panicked"))
            .collect()
    });

    let thresholds = |action: &ManifestAction<PodDisruptionBudget>| match action {
        ManifestAction::Apply(pdb) => {
            let spec = pdb.spec.clone().unwrap();
            Some((spec.min_available, spec.max_unavailable))
        }
        _ => None,
    };
    assert_eq!(
        thresholds(&results[0]),
        Some((Some(IntOrString::Int(1)), None))
    );
    assert_eq!(
        thresholds(&results[1]),
        Some((None, Some(IntOrString::Int(1))))
    );
    assert_eq!(results[2], ManifestAction::Delete);
}

/// Story: adapt failures abort the cycle and reach the caller untouched.
#[test]
fn story_adapt_failure_is_reported_to_caller() {
    let adapter = GenericAdapter::new([
        set_hosted_cluster_annotation(),
        with_adapt_function(|ctx: &WorkloadContext, _: &mut Secret| {
            match ctx.hcp.spec.release_image.as_deref() {
                Some(_) => Ok(()),
                None => Err(ComponentError::adapt("pull-secret", "release image not set")),
            }
        }),
    ]);
    let ctx = WorkloadContext::new(control_plane(
        AvailabilityPolicy::SingleReplica,
        PlatformType::Aws,
        &[],
    ));

    let err = adapter
        .reconcile(
            &ctx,
            Secret {
                metadata: meta("pull-secret"),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, ComponentError::Adapt { .. }));
}
