//! Library-level generation over reference trees.

use ccmeta::core::MetadataError;
use ccmeta::metadata::{GenerateOptions, OutputFormat, Requirement, generate};
use ccmeta::test_utils::{RecordingSink, ReferenceTree};

const CONFLICT_MESSAGE: &str = "conflicting component required status";

fn run(tree: &ReferenceTree) -> (ccmeta::metadata::Generated, RecordingSink) {
    let sink = RecordingSink::default();
    let generated = generate(&GenerateOptions::new(tree.path()), &sink).unwrap();
    (generated, sink)
}

#[test]
fn test_layout_naming_without_directives() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/service.yaml", "kind: Service\n").unwrap();
    tree.add("core/ingress/controller.yaml", "kind: IngressController\n").unwrap();
    tree.add("storage/lso/subscription.yaml", "kind: Subscription\n").unwrap();

    let (generated, sink) = run(&tree);
    assert!(sink.is_empty());

    let manifest = &generated.manifest;
    assert_eq!(manifest.api_version, "v1");
    let names: Vec<(&str, Vec<&str>)> = manifest
        .parts
        .iter()
        .map(|p| (p.name.as_str(), p.components.iter().map(|c| c.name.as_str()).collect()))
        .collect();
    assert_eq!(
        names,
        [("core", vec!["dns", "ingress"]), ("storage", vec!["lso"])]
    );

    for part in &manifest.parts {
        for component in &part.components {
            assert_eq!(component.requirement, Requirement::Required);
            assert!(component.optional_templates.is_empty());
        }
    }
}

#[test]
fn test_directives_override_layout_names() {
    let tree = ReferenceTree::new().unwrap();
    tree.add(
        "misc/stuff/policy.yaml",
        "# cluster-compare-part: networking\n# cluster-compare-component: sriov\nkind: Policy\n",
    )
    .unwrap();
    tree.add(
        "misc/stuff/config.yaml.tmpl",
        "{{- /* cluster-compare-component: sriov-config */ -}}\nkind: Config\n",
    )
    .unwrap();

    let (generated, _) = run(&tree);
    let manifest = &generated.manifest;

    let misc = manifest.part("misc").unwrap();
    assert_eq!(misc.component("sriov-config").unwrap().template_paths().collect::<Vec<_>>(), [
        "misc/stuff/config.yaml.tmpl"
    ]);
    let networking = manifest.part("networking").unwrap();
    assert_eq!(networking.component("sriov").unwrap().template_paths().collect::<Vec<_>>(), [
        "misc/stuff/policy.yaml"
    ]);
    assert!(manifest.parts.iter().all(|p| p.component("stuff").is_none()));
}

#[test]
fn test_optional_only_component_is_optional() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("extras/logging/a.yaml", "# cluster-compare-optional\n").unwrap();
    tree.add("extras/logging/b.yaml", "# cluster-compare-component-optional\n").unwrap();

    let (generated, sink) = run(&tree);
    assert!(sink.is_empty());

    let logging = generated.manifest.part("extras").unwrap().component("logging").unwrap();
    assert_eq!(logging.requirement, Requirement::Optional);
    assert_eq!(logging.optional_templates.len(), 1);
    assert_eq!(logging.required_templates.len(), 1);
}

#[test]
fn test_required_wins_over_optional() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("extras/logging/a.yaml", "# cluster-compare-optional\n").unwrap();
    tree.add("extras/logging/b.yaml", "# cluster-compare-required\n").unwrap();
    tree.add("extras/metrics/a.yaml", "# cluster-compare-optional\n").unwrap();
    tree.add("extras/metrics/b.yaml", "# cluster-compare-component-required\n").unwrap();

    let (generated, sink) = run(&tree);
    assert!(sink.is_empty());

    let extras = generated.manifest.part("extras").unwrap();
    assert_eq!(extras.component("logging").unwrap().requirement, Requirement::Required);
    assert_eq!(extras.component("metrics").unwrap().requirement, Requirement::Required);
}

#[test]
fn test_conflict_is_recoverable_by_default() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/a.yaml", "# cluster-compare-component-optional\n").unwrap();
    tree.add("core/dns/b.yaml", "# cluster-compare-component-required\n").unwrap();
    tree.add("core/dns/c.yaml", "# cluster-compare-component-optional\n").unwrap();
    tree.add("core/ntp/a.yaml", "").unwrap();

    let (generated, sink) = run(&tree);

    let errors = sink.errors();
    assert_eq!(errors.len(), 1, "one report per conflicting component: {errors:?}");
    assert!(errors[0].contains(CONFLICT_MESSAGE));
    assert!(sink.fatals().is_empty());
    assert_eq!(generated.error_count, 1);

    let core = generated.manifest.part("core").unwrap();
    assert_eq!(core.component("dns").unwrap().requirement, Requirement::Optional);
    assert_eq!(core.component("ntp").unwrap().requirement, Requirement::Required);
}

#[test]
fn test_conflict_is_fatal_with_exit_on_error() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/a.yaml", "# cluster-compare-component-optional\n").unwrap();
    tree.add("core/dns/b.yaml", "# cluster-compare-component-required\n").unwrap();

    let sink = RecordingSink::default();
    let options = GenerateOptions::new(tree.path()).with_exit_on_error(true);
    let err = generate(&options, &sink).unwrap_err();

    assert_eq!(
        err,
        MetadataError::ConflictingComponentStatus {
            part: "core".to_string(),
            component: "dns".to_string(),
        }
    );
    assert!(sink.errors().is_empty());
    let fatals = sink.fatals();
    assert_eq!(fatals.len(), 1);
    assert!(fatals[0].contains(CONFLICT_MESSAGE));
}

#[test]
fn test_generation_is_idempotent() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/service.yaml", "# cluster-compare-optional\n").unwrap();
    tree.add("core/dns/configmap.yaml", "").unwrap();
    tree.add("b/x/one.yaml", "# cluster-compare-part: core\n").unwrap();
    tree.add("a/y/two.yaml", "# cluster-compare-component-optional\n").unwrap();

    let (first, _) = run(&tree);
    let (second, _) = run(&tree);
    assert_eq!(first.rendered, second.rendered);
    assert_eq!(first.rendered.as_bytes(), second.rendered.as_bytes());
}

#[test]
fn test_output_does_not_depend_on_checkout_location() {
    let populate = |tree: &ReferenceTree| {
        tree.add("core/dns/service.yaml", "").unwrap();
        tree.add("kustomization.yaml", "# cluster-compare-part: core\n").unwrap();
    };
    let first = ReferenceTree::new().unwrap();
    let second = ReferenceTree::new().unwrap();
    populate(&first);
    populate(&second);
    assert_ne!(first.path().parent(), second.path().parent());

    let (one, _) = run(&first);
    let (two, _) = run(&second);
    assert_eq!(one.rendered, two.rendered);
    assert!(one.manifest.part("core").unwrap().component("reference").is_some());
    assert_eq!(one.manifest.parts.len(), 1);
}

#[test]
fn test_split_component_merges_into_one_entry() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("telco/ptp-a/config.yaml", "# cluster-compare-component: ptp\n").unwrap();
    tree.add(
        "telco/ptp-b/operator.yaml",
        "# cluster-compare-component: ptp\n# cluster-compare-optional\n",
    )
    .unwrap();

    let (generated, sink) = run(&tree);
    assert!(sink.is_empty());

    let telco = generated.manifest.part("telco").unwrap();
    assert_eq!(telco.components.len(), 1);
    let ptp = &telco.components[0];
    assert_eq!(ptp.name, "ptp");
    assert_eq!(ptp.requirement, Requirement::Optional);
    assert_eq!(
        ptp.template_paths().collect::<Vec<_>>(),
        ["telco/ptp-a/config.yaml", "telco/ptp-b/operator.yaml"]
    );
}

#[test]
fn test_empty_name_argument_falls_back_to_layout() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/service.yaml", "# cluster-compare-component:\n# cluster-compare-part:   \n")
        .unwrap();

    let (generated, sink) = run(&tree);
    assert!(sink.is_empty());
    assert!(generated.manifest.part("core").unwrap().component("dns").is_some());
}

#[test]
fn test_rendered_yaml_shape() {
    // One optional template and no required declaration: the component is optional
    // while the silent template stays in requiredTemplates.
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/service.yaml", "").unwrap();
    tree.add("core/dns/extra.yaml", "# cluster-compare-optional\n").unwrap();

    let (generated, _) = run(&tree);
    let expected = "\
apiVersion: v1
parts:
- name: core
  components:
  - name: dns
    type: Optional
    requiredTemplates:
    - path: core/dns/service.yaml
    optionalTemplates:
    - path: core/dns/extra.yaml
";
    assert_eq!(generated.rendered, expected);
}

#[test]
fn test_json_output_parses() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/service.yaml", "# cluster-compare-component-optional\n").unwrap();

    let options = GenerateOptions::new(tree.path()).with_format(OutputFormat::Json);
    let generated = generate(&options, &RecordingSink::default()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&generated.rendered).unwrap();
    assert_eq!(value["apiVersion"], "v1");
    assert_eq!(value["parts"][0]["components"][0]["type"], "Optional");
    assert_eq!(
        value["parts"][0]["components"][0]["requiredTemplates"][0]["path"],
        "core/dns/service.yaml"
    );
}

#[test]
fn test_invalid_utf8_template_is_read_lossily() {
    let tree = ReferenceTree::new().unwrap();
    let path = tree.add("core/dns/binary.yaml", "").unwrap();
    std::fs::write(&path, b"# cluster-compare-optional\n\xff\xfe\n").unwrap();

    let (generated, sink) = run(&tree);
    assert!(sink.is_empty());
    let dns = generated.manifest.part("core").unwrap().component("dns").unwrap();
    assert_eq!(dns.requirement, Requirement::Optional);
}
