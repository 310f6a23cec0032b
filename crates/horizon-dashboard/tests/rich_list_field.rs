//! Integration tests for the rich list field and its owning form field.

use std::sync::Arc;

use horizon_dashboard::config::DashboardConfig;
use horizon_dashboard::forms::{
    AddCommit, AddDropdown, DropdownChoice, DropdownGroup, EditCommit, FieldBinding, FnDelegate,
    FormField, ListChangeEvent, ListChangeKind, MenuAlignment, RenderFn, RichListField,
};
use horizon_dashboard::Error;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SymbolSource {
    #[serde(rename = "type")]
    kind: String,
    name: String,
}

impl SymbolSource {
    fn new(kind: &str, name: &str) -> Self {
        Self {
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }
}

type Changes = Arc<Mutex<Vec<(String, ListChangeEvent)>>>;

fn owner(initial: &str) -> (Arc<FormField>, Changes) {
    let owner = Arc::new(
        FormField::new("symbolSources", initial)
            .with_label("Custom Repositories")
            .with_help("Configures which custom repositories are used"),
    );
    let changes: Changes = Arc::new(Mutex::new(Vec::new()));
    let changes_clone = changes.clone();
    owner
        .value_changed
        .connect(move |change| changes_clone.lock().push(change.clone()));
    (owner, changes)
}

fn repository_menu() -> AddDropdown<SymbolSource> {
    AddDropdown::new(vec![
        DropdownGroup::new(
            "Built-in Repositories",
            vec![DropdownChoice::new("Microsoft", SymbolSource::new("builtin", "microsoft"))],
        ),
        DropdownGroup::new(
            "Custom Repositories",
            vec![
                DropdownChoice::new("Amazon S3", SymbolSource::new("s3", "New Repository")),
                DropdownChoice::new("HTTP", SymbolSource::new("http", "New Repository")),
            ],
        ),
    ])
}

#[test]
fn test_add_s3_via_default_delegate() {
    setup();
    let (owner, changes) = owner("[]");
    let menu = AddDropdown::flat(vec![DropdownChoice::new(
        "Amazon S3",
        json!({"value": "s3", "label": "Amazon S3"}),
    )]);
    let field = RichListField::builder(owner.clone(), menu).build();

    field.dropdown().toggle();
    field.dropdown().set_query("s3");
    assert!(field.dropdown().select_key("Amazon S3"));

    let changes = changes.lock();
    assert_eq!(
        *changes,
        vec![(
            r#"[{"value":"s3","label":"Amazon S3"}]"#.to_string(),
            ListChangeEvent::new(ListChangeKind::Add, 0)
        )]
    );
}

#[test]
fn test_remove_first_item() {
    setup();
    let (owner, changes) = owner(r#"[{"v":1},{"v":2}]"#);
    let field = RichListField::builder(owner.clone(), AddDropdown::<Value>::flat(vec![])).build();

    field.request_remove(0).unwrap();

    assert_eq!(
        *changes.lock(),
        vec![(
            r#"[{"v":2}]"#.to_string(),
            ListChangeEvent::new(ListChangeKind::Remove, 0)
        )]
    );
}

#[test]
fn test_cancelled_edit_emits_nothing() {
    setup();
    let (owner, changes) = owner(r#"[{"v":1}]"#);
    let field = RichListField::builder(owner.clone(), AddDropdown::<Value>::flat(vec![]))
        .delegate(FnDelegate::new().on_edit(|_item: &Value, commit: EditCommit<Value>| {
            // The user dismissed the dialog.
            drop(commit);
        }))
        .build();

    field.request_edit(0).unwrap();

    assert!(changes.lock().is_empty());
    assert_eq!(owner.value(), r#"[{"v":1}]"#);
}

#[test]
fn test_typed_items_render_and_update() {
    setup();
    let (owner, changes) = owner(r#"[{"type":"http","name":"Company Symbols"}]"#);
    let field = RichListField::builder(owner.clone(), repository_menu())
        .render_item(RenderFn::new(|source: &SymbolSource| {
            format!("{} ({})", source.name, source.kind)
        }))
        .delegate(FnDelegate::new().on_edit(|source: &SymbolSource, commit| {
            let mut edited = source.clone();
            edited.name = "Internal Symbols".into();
            commit.commit(edited).unwrap();
        }))
        .build();

    assert_eq!(
        field.render().unwrap().labels().cloned().collect::<Vec<_>>(),
        vec!["Company Symbols (http)"]
    );

    field.request_edit(0).unwrap();
    field.dropdown().select(1, 0);

    assert_eq!(
        field.items().unwrap(),
        vec![
            SymbolSource::new("http", "Internal Symbols"),
            SymbolSource::new("s3", "New Repository"),
        ]
    );
    let kinds: Vec<_> = changes.lock().iter().map(|(_, event)| event.kind).collect();
    assert_eq!(kinds, vec![ListChangeKind::Update, ListChangeKind::Add]);
}

#[test]
fn test_deferred_add_applies_to_current_value() {
    setup();
    let (owner, changes) = owner("[]");
    let pending: Arc<Mutex<Vec<(SymbolSource, AddCommit<SymbolSource>)>>> =
        Arc::new(Mutex::new(Vec::new()));

    let pending_clone = pending.clone();
    let field = RichListField::builder(owner.clone(), repository_menu())
        .delegate(FnDelegate::new().on_add(move |source, commit| {
            // Open a settings dialog; the commit runs when it is confirmed.
            pending_clone.lock().push((source, commit));
        }))
        .build();

    field.dropdown().select(1, 1);
    assert!(changes.lock().is_empty());

    // Meanwhile the form reloads the saved value.
    owner.reset(r#"[{"type":"builtin","name":"microsoft"}]"#);

    let (mut source, commit) = pending.lock().remove(0);
    source.name = "Company Symbols".into();
    commit.commit(source).unwrap();

    assert_eq!(
        owner.value(),
        r#"[{"type":"builtin","name":"microsoft"},{"type":"http","name":"Company Symbols"}]"#
    );
    assert_eq!(changes.lock()[0].1, ListChangeEvent::new(ListChangeKind::Add, 1));
}

#[test]
fn test_stale_remove_is_rejected() {
    setup();
    let (owner, changes) = owner(r#"[{"v":1},{"v":2}]"#);
    let pending = Arc::new(Mutex::new(Vec::new()));

    let pending_clone = pending.clone();
    let field = RichListField::builder(owner.clone(), AddDropdown::<Value>::flat(vec![]))
        .delegate(FnDelegate::new().on_remove(move |_item: &Value, commit| {
            pending_clone.lock().push(commit);
        }))
        .build();

    field.request_remove(1).unwrap();
    owner.reset(r#"[{"v":1}]"#);

    let commit = pending.lock().remove(0);
    assert!(matches!(
        commit.commit(),
        Err(Error::IndexOutOfRange { index: 1, len: 1 })
    ));
    assert_eq!(owner.value(), r#"[{"v":1}]"#);
    assert!(changes.lock().is_empty());
}

#[test]
fn test_config_drives_field_defaults() {
    setup();
    let config = DashboardConfig::from_toml_str(
        r#"
        [rich-list]
        add-button-text = "Add Repository"
        menu-alignment = "right"
        "#,
    )
    .unwrap();
    let (owner, _) = owner("[]");
    let field = RichListField::builder(owner, repository_menu())
        .config(&config.rich_list)
        .build();

    let view = field.render().unwrap();
    assert!(view.is_empty());
    assert_eq!(view.add_button.text, "Add Repository");
    assert_eq!(field.dropdown().alignment(), MenuAlignment::Right);
}
