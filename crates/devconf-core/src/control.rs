// ── Rendered controls ──
//
// Toolkit-neutral models of the four input controls. A presenter draws
// them and mutates them in response to user input; the schema walker
// creates them from the store and reads them back on commit.

/// Increment used by a spinner when the schema does not set one.
pub const DEFAULT_SPINNER_STEP: i64 = 1;

// ── Toggle ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Toggle {
    checked: bool,
}

impl Toggle {
    pub fn new(checked: bool) -> Self {
        Self { checked }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }
}

// ── Choice list ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceEntry {
    pub label: String,
    pub value: i64,
}

/// List selector. `selected == None` is a legitimate state: it is what a
/// stored value matching none of the entries produces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChoiceList {
    entries: Vec<ChoiceEntry>,
    selected: Option<usize>,
}

impl ChoiceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: i64) {
        self.entries.push(ChoiceEntry {
            label: label.into(),
            value,
        });
    }

    pub fn entries(&self) -> &[ChoiceEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Select by position. Out-of-range positions clear the selection.
    pub fn set_selected_index(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.entries.len());
    }

    /// Select the entry carrying `value`. When several do, the last one
    /// wins. Returns whether one matched; when none does the selection is
    /// cleared.
    pub fn select_value(&mut self, value: i64) -> bool {
        self.selected = self.entries.iter().rposition(|e| e.value == value);
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&ChoiceEntry> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    pub fn selected_value(&self) -> Option<i64> {
        self.selected().map(|e| e.value)
    }

    /// Move to the next entry, wrapping. From no selection, picks the first.
    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.entries.len(),
            None => 0,
        });
    }

    /// Move to the previous entry, wrapping. From no selection, picks the last.
    pub fn select_prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let len = self.entries.len();
        self.selected = Some(match self.selected {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        });
    }
}

// ── Spinner ──────────────────────────────────────────────────────────

/// Bounded integer input. The value never leaves `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spinner {
    min: i64,
    max: i64,
    step: i64,
    value: i64,
}

impl Spinner {
    /// A spinner over `[min, max]` holding `min`. An inverted range
    /// collapses to `[min, min]`.
    pub fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            max: max.max(min),
            step: DEFAULT_SPINNER_STEP,
            value: min,
        }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn set_step(&mut self, step: i64) {
        if step > 0 {
            self.step = step;
        }
    }

    /// Set the value, clamped into range.
    pub fn set_value(&mut self, value: i64) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn step_up(&mut self) {
        self.set_value(self.value.saturating_add(self.step));
    }

    pub fn step_down(&mut self) {
        self.set_value(self.value.saturating_sub(self.step));
    }
}

// ── Path field ───────────────────────────────────────────────────────

/// Host path entry. `filter` and `create` are hints for file pickers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathField {
    path: String,
    filter: String,
    create: bool,
}

impl PathField {
    pub fn new(filter: impl Into<String>, create: bool) -> Self {
        Self {
            path: String::new(),
            filter: filter.into(),
            create,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn creates_file(&self) -> bool {
        self.create
    }
}

// ── Control ──────────────────────────────────────────────────────────

/// A live control of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Toggle(Toggle),
    Choice(ChoiceList),
    Spinner(Spinner),
    Path(PathField),
}

/// Kind-erased current value of a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlValue {
    Flag(bool),
    Selection(Option<i64>),
    Int(i64),
    Path(String),
}

impl Control {
    pub fn value(&self) -> ControlValue {
        match self {
            Self::Toggle(t) => ControlValue::Flag(t.is_checked()),
            Self::Choice(c) => ControlValue::Selection(c.selected_value()),
            Self::Spinner(s) => ControlValue::Int(s.value()),
            Self::Path(p) => ControlValue::Path(p.path().to_owned()),
        }
    }

    /// Apply `value` the way user input would. Returns `false` when the
    /// value is of another kind (the control is left alone) or names a
    /// choice no entry carries (the selection is cleared).
    pub fn set_value(&mut self, value: ControlValue) -> bool {
        match (self, value) {
            (Self::Toggle(t), ControlValue::Flag(on)) => t.set_checked(on),
            (Self::Choice(c), ControlValue::Selection(Some(v))) => return c.select_value(v),
            (Self::Choice(c), ControlValue::Selection(None)) => c.set_selected_index(None),
            (Self::Spinner(s), ControlValue::Int(v)) => s.set_value(v),
            (Self::Path(p), ControlValue::Path(path)) => p.set_path(path),
            _ => return false,
        }
        true
    }

    pub fn as_choice(&self) -> Option<&ChoiceList> {
        match self {
            Self::Choice(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_spinner(&self) -> Option<&Spinner> {
        match self {
            Self::Spinner(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathField> {
        match self {
            Self::Path(p) => Some(p),
            _ => None,
        }
    }
}
