// devconf-core: schema-driven configuration forms for emulated devices.
//
// A device's static field table is materialised into a form (one control
// per field, initialised from the configuration store), shown through a
// `Presenter`, and written back field by field only when the user accepts.

pub mod control;
pub mod device;
pub mod error;
pub mod form;
pub mod schema;
pub mod session;
pub mod store;
pub mod walker;

// ── Primary re-exports ──────────────────────────────────────────────
pub use control::{ChoiceEntry, ChoiceList, Control, ControlValue, PathField, Spinner, Toggle};
pub use device::{
    Bus, BusContext, BusNaming, DeviceContext, DeviceHandle, DeviceNaming, DeviceType,
    MAX_DEVICE_NAME_LEN, display_name,
};
pub use error::{PresentError, SessionError};
pub use form::{Form, FormRow};
pub use schema::{Choice, DefaultValue, DeviceSchema, FieldDescriptor, FieldKind, SelectionFlavor};
pub use session::{
    DialogOutcome, FormSession, Presenter, SessionOutcome, SessionState, configure_device,
};
pub use store::{ConfigStore, MemoryStore, Sections, StoreValue};
