// ── Device configuration schema ──
//
// Static, immutable descriptions of a device's tunable parameters. Device
// tables are declared as `static` slices of `FieldDescriptor`, optionally
// closed by an `End` sentinel the same way choice lists are closed by an
// entry with an empty label.

use strum::{Display, EnumIter};

// ── Choices ──────────────────────────────────────────────────────────

/// One entry of a single-choice field: visible label plus stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub label: &'static str,
    pub value: i64,
}

impl Choice {
    pub const fn new(label: &'static str, value: i64) -> Self {
        Self { label, value }
    }

    /// Terminator entry. Choice iteration stops at the first empty label.
    pub const END: Self = Self::new("", 0);

    fn is_end(&self) -> bool {
        self.label.is_empty()
    }
}

/// Enumerated sub-kinds. They all render as the same list selector and
/// store the selected entry's integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum SelectionFlavor {
    Selection,
    Midi,
    MidiIn,
    Hex16,
    Hex20,
}

// ── Field kinds ──────────────────────────────────────────────────────

/// The closed set of field kinds, each carrying its own payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// On/off flag, stored as 1 or 0.
    Binary,
    /// One value out of a fixed list of choices.
    Selection {
        flavor: SelectionFlavor,
        choices: &'static [Choice],
    },
    /// Bounded integer. A non-positive `step` keeps the control's own increment.
    Spinner { min: i64, max: i64, step: i64 },
    /// Path to a file on the host.
    FileName {
        /// File-dialog style filter, e.g. `"ROM images (*.rom *.bin)"`.
        filter: &'static str,
        /// Whether the path may name a file that does not exist yet.
        create: bool,
    },
    /// End-of-table sentinel.
    End,
}

impl FieldKind {
    /// Short, stable tag used in logs and dumps.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Selection { .. } => "selection",
            Self::Spinner { .. } => "spinner",
            Self::FileName { .. } => "filename",
            Self::End => "end",
        }
    }
}

// ── Defaults ─────────────────────────────────────────────────────────

/// Typed default used when the store has no entry for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Int(i64),
    Str(&'static str),
}

impl DefaultValue {
    /// Integer view. A string default reads as 0.
    pub fn as_int(&self) -> i64 {
        match self {
            Self::Int(v) => *v,
            Self::Str(_) => 0,
        }
    }

    /// String view. An integer default reads as the empty string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int(_) => "",
            Self::Str(s) => s,
        }
    }
}

// ── Descriptor ───────────────────────────────────────────────────────

/// One configurable parameter of a device.
///
/// `name` is unique within a schema and doubles as the store key and the
/// lookup handle of the control built for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    pub default: DefaultValue,
}

impl FieldDescriptor {
    pub const fn binary(name: &'static str, description: &'static str, default: bool) -> Self {
        Self {
            name,
            description,
            kind: FieldKind::Binary,
            default: DefaultValue::Int(if default { 1 } else { 0 }),
        }
    }

    pub const fn selection(
        name: &'static str,
        description: &'static str,
        choices: &'static [Choice],
        default: i64,
    ) -> Self {
        Self::selection_flavor(
            name,
            description,
            SelectionFlavor::Selection,
            choices,
            default,
        )
    }

    pub const fn selection_flavor(
        name: &'static str,
        description: &'static str,
        flavor: SelectionFlavor,
        choices: &'static [Choice],
        default: i64,
    ) -> Self {
        Self {
            name,
            description,
            kind: FieldKind::Selection { flavor, choices },
            default: DefaultValue::Int(default),
        }
    }

    pub const fn spinner(
        name: &'static str,
        description: &'static str,
        min: i64,
        max: i64,
        step: i64,
        default: i64,
    ) -> Self {
        Self {
            name,
            description,
            kind: FieldKind::Spinner { min, max, step },
            default: DefaultValue::Int(default),
        }
    }

    pub const fn file_name(
        name: &'static str,
        description: &'static str,
        filter: &'static str,
        default: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            kind: FieldKind::FileName {
                filter,
                create: false,
            },
            default: DefaultValue::Str(default),
        }
    }

    /// Same as [`file_name`](Self::file_name), but the path may not exist yet.
    pub const fn new_file_name(
        name: &'static str,
        description: &'static str,
        filter: &'static str,
        default: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            kind: FieldKind::FileName {
                filter,
                create: true,
            },
            default: DefaultValue::Str(default),
        }
    }

    /// The table terminator.
    pub const END: Self = Self {
        name: "",
        description: "",
        kind: FieldKind::End,
        default: DefaultValue::Int(0),
    };

    pub fn is_end(&self) -> bool {
        matches!(self.kind, FieldKind::End)
    }

    /// Choices of a selection field, up to the empty-label terminator.
    /// Empty for every other kind.
    pub fn choices(&self) -> impl Iterator<Item = &'static Choice> + use<> {
        let choices: &'static [Choice] = match self.kind {
            FieldKind::Selection { choices, .. } => choices,
            _ => &[],
        };
        choices.iter().take_while(|c| !c.is_end())
    }
}

// ── Schema ───────────────────────────────────────────────────────────

/// A device's ordered field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceSchema {
    fields: &'static [FieldDescriptor],
}

impl DeviceSchema {
    pub const EMPTY: Self = Self::new(&[]);

    pub const fn new(fields: &'static [FieldDescriptor]) -> Self {
        Self { fields }
    }

    /// Descriptors in declaration order, stopping at the first `End`
    /// sentinel (or the end of the table when there is none).
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> + use<> {
        self.fields.iter().take_while(|f| !f.is_end())
    }

    pub fn len(&self) -> usize {
        self.fields().count()
    }

    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields().find(|f| f.name == name)
    }
}
