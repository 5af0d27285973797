// ── Schema walker ──
//
// Maps field descriptors to controls (build) and controls back to store
// writes (commit). Each direction is one `match` over `FieldKind`; the
// form's name → row map is the only link between the two passes.

use tracing::{debug, trace};

use crate::control::{ChoiceList, Control, PathField, Spinner, Toggle};
use crate::device::DeviceContext;
use crate::form::Form;
use crate::schema::{DeviceSchema, FieldDescriptor, FieldKind};
use crate::store::ConfigStore;

/// Build the control for one field, initialised from the store (or the
/// field's default on a miss). Returns `None` only for the `End` sentinel.
pub fn build<S>(field: &FieldDescriptor, ctx: &DeviceContext, store: &S) -> Option<Control>
where
    S: ConfigStore + ?Sized,
{
    let ns = ctx.name();
    let control = match field.kind {
        FieldKind::Binary => {
            let value = store.get_int(ns, field.name, field.default.as_int());
            Control::Toggle(Toggle::new(value > 0))
        }
        FieldKind::Selection { .. } => {
            let value = store.get_int(ns, field.name, field.default.as_int());
            let mut list = ChoiceList::new();
            for choice in field.choices() {
                list.push(choice.label, choice.value);
            }
            if !list.select_value(value) {
                debug!(field = field.name, value, "stored value matches no choice");
            }
            Control::Choice(list)
        }
        FieldKind::Spinner { min, max, step } => {
            let value = store.get_int(ns, field.name, field.default.as_int());
            let mut spinner = Spinner::new(min, max);
            spinner.set_step(step);
            spinner.set_value(value);
            Control::Spinner(spinner)
        }
        FieldKind::FileName { filter, create } => {
            let value = store.get_string(ns, field.name, field.default.as_str());
            let mut path = PathField::new(filter, create);
            path.set_path(value);
            Control::Path(path)
        }
        FieldKind::End => return None,
    };
    trace!(field = field.name, kind = field.kind.tag(), value = ?control.value(), "built control");
    Some(control)
}

/// Write one control's current value to the store.
///
/// # Panics
///
/// When `control` is not of the kind `field` builds. That means build and
/// commit walked different schemas, which is a caller bug.
pub fn commit<S>(field: &FieldDescriptor, control: &Control, ctx: &DeviceContext, store: &mut S)
where
    S: ConfigStore + ?Sized,
{
    let ns = ctx.name();
    match (&field.kind, control) {
        (FieldKind::Binary, Control::Toggle(toggle)) => {
            store.set_int(ns, field.name, i64::from(toggle.is_checked()));
        }
        (FieldKind::Selection { .. }, Control::Choice(list)) => {
            let value = list.selected_value().unwrap_or_else(|| {
                debug!(field = field.name, "no choice selected, writing default");
                field.default.as_int()
            });
            store.set_int(ns, field.name, value);
        }
        (FieldKind::Spinner { .. }, Control::Spinner(spinner)) => {
            store.set_int(ns, field.name, spinner.value());
        }
        (FieldKind::FileName { .. }, Control::Path(path)) => {
            store.set_string(ns, field.name, path.path());
        }
        (FieldKind::End, _) => return,
        (kind, control) => panic!(
            "field '{}' is a {} field but its control is {control:?}",
            field.name,
            kind.tag()
        ),
    }
    trace!(field = field.name, namespace = ns, "committed control");
}

/// Build one row per schema field, in schema order.
pub fn build_form<S>(title: &str, schema: &DeviceSchema, ctx: &DeviceContext, store: &S) -> Form
where
    S: ConfigStore + ?Sized,
{
    let mut form = Form::new(title);
    for field in schema.fields() {
        if let Some(control) = build(field, ctx, store) {
            form.add_row(field.name, field.description, control);
        }
    }
    form
}

/// Commit every schema field from `form`, in schema order. Returns the
/// number of store writes.
///
/// # Panics
///
/// When a schema field has no row in `form`, or its row holds a control
/// of another kind.
pub fn commit_form<S>(
    schema: &DeviceSchema,
    form: &Form,
    ctx: &DeviceContext,
    store: &mut S,
) -> usize
where
    S: ConfigStore + ?Sized,
{
    let mut writes = 0;
    for field in schema.fields() {
        let Some(control) = form.control(field.name) else {
            panic!("no control was built for field '{}'", field.name);
        };
        commit(field, control, ctx, store);
        writes += 1;
    }
    writes
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::control::ControlValue;
    use crate::schema::{Choice, SelectionFlavor};
    use crate::store::{MemoryStore, StoreValue};

    const AB: &[Choice] = &[Choice::new("A", 1), Choice::new("B", 2), Choice::END];

    const PORTS: &[Choice] = &[
        Choice::new("0x220", 0x220),
        Choice::new("0x240", 0x240),
        Choice::END,
    ];

    static FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::binary("opl", "Enable OPL", true),
        FieldDescriptor::selection("pick", "Pick", AB, 1),
        FieldDescriptor::selection_flavor("base", "Address", SelectionFlavor::Hex16, PORTS, 0x220),
        FieldDescriptor::spinner("level", "Level", 0, 10, 0, 3),
        FieldDescriptor::file_name("rom", "ROM image", "ROM (*.rom)", "roms/default.rom"),
        FieldDescriptor::END,
    ];

    fn ctx() -> DeviceContext {
        DeviceContext::named("Test Device")
    }

    fn field(name: &str) -> &'static FieldDescriptor {
        DeviceSchema::new(FIELDS).field(name).unwrap()
    }

    #[test]
    fn defaults_used_on_empty_store() {
        let store = MemoryStore::new();
        let form = build_form("t", &DeviceSchema::new(FIELDS), &ctx(), &store);
        let values: Vec<_> = form.rows().map(|r| r.control.value()).collect();
        assert_eq!(
            values,
            vec![
                ControlValue::Flag(true),
                ControlValue::Selection(Some(1)),
                ControlValue::Selection(Some(0x220)),
                ControlValue::Int(3),
                ControlValue::Path("roms/default.rom".into()),
            ]
        );
    }

    #[test]
    fn binary_is_on_only_for_positive_values() {
        let mut store = MemoryStore::new();
        for (stored, expected) in [(0, false), (1, true), (5, true), (-1, false)] {
            store.set_int("Test Device", "opl", stored);
            let control = build(field("opl"), &ctx(), &store).unwrap();
            assert_eq!(
                control.value(),
                ControlValue::Flag(expected),
                "stored {stored}"
            );
        }
    }

    #[test]
    fn selection_selects_matching_entry() {
        let mut store = MemoryStore::new();
        store.set_int("Test Device", "pick", 2);
        let control = build(field("pick"), &ctx(), &store).unwrap();
        let list = control.as_choice().unwrap();
        assert_eq!(list.selected().unwrap().label, "B");
        assert_eq!(list.entries().len(), 2);
    }

    #[test]
    fn selection_unmatched_value_leaves_no_selection() {
        let mut store = MemoryStore::new();
        store.set_int("Test Device", "pick", 5);
        let control = build(field("pick"), &ctx(), &store).unwrap();
        assert_eq!(control.as_choice().unwrap().selected_index(), None);
    }

    #[test]
    fn repeated_choice_value_opens_on_last_entry() {
        const MODES: &[Choice] = &[
            Choice::new("Default", 0),
            Choice::new("Disabled", 0),
            Choice::new("Enabled", 1),
            Choice::END,
        ];
        static REPEATED: &[FieldDescriptor] =
            &[FieldDescriptor::selection("mode", "Mode", MODES, 0)];

        let control = build(&REPEATED[0], &ctx(), &MemoryStore::new()).unwrap();
        let list = control.as_choice().unwrap();
        assert_eq!(list.selected_index(), Some(1));
        assert_eq!(list.selected().unwrap().label, "Disabled");
    }

    #[test]
    fn unselected_choice_commits_default() {
        let mut store = MemoryStore::new();
        store.set_int("Test Device", "pick", 5);
        let control = build(field("pick"), &ctx(), &store).unwrap();
        commit(field("pick"), &control, &ctx(), &mut store);
        assert_eq!(store.get("Test Device", "pick"), Some(&StoreValue::Int(1)));
    }

    #[test]
    fn spinner_clamps_stored_value() {
        let mut store = MemoryStore::new();
        store.set_int("Test Device", "level", 999);
        let control = build(field("level"), &ctx(), &store).unwrap();
        let spinner = control.as_spinner().unwrap();
        assert_eq!(spinner.value(), 10);
        assert_eq!(spinner.step(), crate::control::DEFAULT_SPINNER_STEP);
    }

    #[test]
    fn spinner_positive_step_applies() {
        static STEPPED: &[FieldDescriptor] =
            &[FieldDescriptor::spinner("mem", "Memory", 0, 1024, 64, 256)];
        let store = MemoryStore::new();
        let control = build(&STEPPED[0], &ctx(), &store).unwrap();
        assert_eq!(control.as_spinner().unwrap().step(), 64);
    }

    #[test]
    fn file_name_reads_string() {
        let mut store = MemoryStore::new();
        store.set_string("Test Device", "rom", "/roms/custom.bin");
        let control = build(field("rom"), &ctx(), &store).unwrap();
        assert_eq!(control.as_path().unwrap().path(), "/roms/custom.bin");
        assert_eq!(control.as_path().unwrap().filter(), "ROM (*.rom)");
    }

    #[test]
    fn end_sentinel_builds_nothing() {
        assert!(build(&FieldDescriptor::END, &ctx(), &MemoryStore::new()).is_none());
    }

    #[test]
    fn round_trip_through_store() {
        let schema = DeviceSchema::new(FIELDS);
        let mut store = MemoryStore::new();
        let mut form = build_form("t", &schema, &ctx(), &store);

        let edits = [
            ("opl", ControlValue::Flag(false)),
            ("pick", ControlValue::Selection(Some(2))),
            ("base", ControlValue::Selection(Some(0x240))),
            ("level", ControlValue::Int(7)),
            ("rom", ControlValue::Path("/tmp/x.rom".into())),
        ];
        for (name, value) in &edits {
            assert!(form.control_mut(name).unwrap().set_value(value.clone()));
        }

        assert_eq!(commit_form(&schema, &form, &ctx(), &mut store), 5);

        let rebuilt = build_form("t", &schema, &ctx(), &store);
        for (name, value) in &edits {
            assert_eq!(&rebuilt.control(name).unwrap().value(), value, "{name}");
        }
    }

    #[test]
    fn writes_are_scoped_to_context() {
        let schema = DeviceSchema::new(FIELDS);
        let mut store = MemoryStore::new();
        let other = DeviceContext::named("Test Device #2");
        let form = build_form("t", &schema, &other, &store);
        commit_form(&schema, &form, &other, &mut store);
        assert!(store.has_section("Test Device #2"));
        assert!(!store.has_section("Test Device"));
        assert_eq!(store.sections()["Test Device #2"].len(), 5);
    }

    #[test]
    fn empty_schema_builds_empty_form() {
        let store = MemoryStore::new();
        let form = build_form("t", &DeviceSchema::EMPTY, &ctx(), &store);
        assert!(form.is_empty());
    }

    #[test]
    #[should_panic(expected = "no control was built for field 'opl'")]
    fn commit_without_control_panics() {
        let mut store = MemoryStore::new();
        commit_form(
            &DeviceSchema::new(FIELDS),
            &Form::new("t"),
            &ctx(),
            &mut store,
        );
    }

    #[test]
    #[should_panic(expected = "is a binary field")]
    fn commit_with_wrong_control_kind_panics() {
        let mut store = MemoryStore::new();
        let control = Control::Spinner(Spinner::new(0, 1));
        commit(field("opl"), &control, &ctx(), &mut store);
    }
}
