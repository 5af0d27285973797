// ── Devices, instances and naming ──
//
// A `DeviceType` is the static metadata of an emulated peripheral. A
// `DeviceHandle` pairs it with an instance discriminator so that two
// identical cards keep separate settings; `DeviceContext` is the store
// namespace derived from that pair.

use std::fmt;

use strum::{Display, EnumIter};
use tracing::trace;

use crate::schema::DeviceSchema;
use crate::store::ConfigStore;

/// Upper bound, in bytes, of a resolved device display name.
pub const MAX_DEVICE_NAME_LEN: usize = 511;

// ── Bus ──────────────────────────────────────────────────────────────

/// Expansion bus a device attaches to. Displays as the tag used in names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Bus {
    #[strum(serialize = "ISA")]
    Isa,
    #[strum(serialize = "ISA16")]
    Isa16,
    #[strum(serialize = "MCA")]
    Mca,
    #[strum(serialize = "EISA")]
    Eisa,
    #[strum(serialize = "VLB")]
    Vlb,
    #[strum(serialize = "PCI")]
    Pci,
    #[strum(serialize = "AGP")]
    Agp,
    #[strum(serialize = "USB")]
    Usb,
}

/// Whether names are shown with their bus tag, e.g. `"[ISA16] Sound Blaster 16"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusContext {
    #[default]
    Hidden,
    Shown,
}

// ── Device type ──────────────────────────────────────────────────────

/// Static metadata of a device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceType {
    /// Human-readable name. Also the base of the store namespace.
    pub name: &'static str,
    /// Stable identifier used on the command line and in machine configs.
    pub internal_name: &'static str,
    pub bus: Option<Bus>,
    pub schema: DeviceSchema,
}

impl DeviceType {
    pub fn has_config(&self) -> bool {
        !self.schema.is_empty()
    }
}

/// A device type plus the instance it refers to. Instance 0 means the
/// device can only be attached once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceHandle<'d> {
    pub device: &'d DeviceType,
    pub instance: u32,
}

impl<'d> DeviceHandle<'d> {
    pub fn new(device: &'d DeviceType, instance: u32) -> Self {
        Self { device, instance }
    }

    pub fn single(device: &'d DeviceType) -> Self {
        Self::new(device, 0)
    }
}

// ── Device context ───────────────────────────────────────────────────

/// Store namespace for one device instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceContext {
    name: String,
}

impl DeviceContext {
    /// Derive the namespace of `handle`.
    ///
    /// Instance 0 uses the bare device name, instance `n` uses `"<name> #<n>"`.
    /// The first instance falls back to the bare name when only a bare
    /// section exists, so settings saved before the device became
    /// multi-instance are still found.
    pub fn derive<S>(handle: DeviceHandle<'_>, store: &S) -> Self
    where
        S: ConfigStore + ?Sized,
    {
        let base = handle.device.name;
        if handle.instance == 0 {
            return Self::named(base);
        }

        let numbered = format!("{base} #{}", handle.instance);
        if handle.instance == 1 && !store.has_section(&numbered) && store.has_section(base) {
            trace!(device = base, "using unnumbered section for first instance");
            return Self::named(base);
        }
        Self { name: numbered }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for DeviceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ── Naming ───────────────────────────────────────────────────────────

/// Produces a device's canonical name for a bus context.
pub trait DeviceNaming {
    fn canonical_name(&self, device: &DeviceType, bus: BusContext) -> String;
}

/// Default naming: adds or strips the leading `[BUS] ` tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusNaming;

impl BusNaming {
    fn strip_tag(name: &str) -> &str {
        if name.starts_with('[') {
            if let Some(end) = name.find("] ") {
                return &name[end + 2..];
            }
        }
        name
    }
}

impl DeviceNaming for BusNaming {
    fn canonical_name(&self, device: &DeviceType, bus: BusContext) -> String {
        let bare = Self::strip_tag(device.name);
        match (bus, device.bus) {
            (BusContext::Shown, Some(tag)) => format!("[{tag}] {bare}"),
            _ => bare.to_owned(),
        }
    }
}

/// Label shown for a device slot.
///
/// `"none"` and `"internal"` have fixed labels and never consult `device`.
/// Otherwise an absent device yields an empty label and a present one is
/// named by `naming`, capped at [`MAX_DEVICE_NAME_LEN`] bytes.
pub fn display_name<N>(
    device: Option<&DeviceType>,
    internal_name: &str,
    bus: BusContext,
    naming: &N,
) -> String
where
    N: DeviceNaming + ?Sized,
{
    match internal_name {
        "none" => "None".to_owned(),
        "internal" => "Internal".to_owned(),
        _ => device.map_or_else(String::new, |d| {
            truncate_name(naming.canonical_name(d, bus))
        }),
    }
}

fn truncate_name(mut name: String) -> String {
    if name.len() > MAX_DEVICE_NAME_LEN {
        let mut end = MAX_DEVICE_NAME_LEN;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name.truncate(end);
    }
    name
}
