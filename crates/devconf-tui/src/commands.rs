//! Non-interactive commands: `--list` and `--dump`.

use std::fmt::Write as _;

use devconf_config::FileStore;
use devconf_core::{
    BusContext, BusNaming, ConfigStore, Control, DeviceContext, DeviceHandle, DeviceType,
    display_name, walker,
};

use crate::catalog;

/// One line per catalog device, preceded by the `none` slot.
pub fn list_devices(show_bus: bool) -> String {
    let bus = if show_bus {
        BusContext::Shown
    } else {
        BusContext::Hidden
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {}",
        "none",
        display_name(None, "none", bus, &BusNaming)
    );
    for &device in catalog::DEVICES {
        let name = display_name(Some(device), device.internal_name, bus, &BusNaming);
        let suffix = if device.has_config() {
            ""
        } else {
            "  (no settings)"
        };
        let _ = writeln!(out, "{:<10} {name}{suffix}", device.internal_name);
    }
    out
}

/// Current values of one device instance, as the dialog would show them.
/// Values not present in the store are marked as defaults.
pub fn dump_device(device: &DeviceType, instance: u32, store: &FileStore) -> String {
    let ctx = DeviceContext::derive(DeviceHandle::new(device, instance), store);
    let form = walker::build_form(ctx.name(), &device.schema, &ctx, store);
    let section = store.section(ctx.name());

    let mut out = String::new();
    let _ = writeln!(out, "[{ctx}]");
    if form.is_empty() {
        out.push_str("  (no settings)\n");
        return out;
    }

    let width = form.names().map(str::len).max().unwrap_or(0);
    for row in form.rows() {
        let stored = section.is_some_and(|s| s.contains_key(&row.name));
        let value = match &row.control {
            Control::Toggle(toggle) if toggle.is_checked() => "on".to_owned(),
            Control::Toggle(_) => "off".to_owned(),
            Control::Choice(list) => match list.selected() {
                Some(entry) => entry.label.clone(),
                None => format!("(unlisted: {})", store.get_int(ctx.name(), &row.name, 0)),
            },
            Control::Spinner(spinner) => spinner.value().to_string(),
            Control::Path(path) if path.path().is_empty() => "(none)".to_owned(),
            Control::Path(path) => path.path().to_owned(),
        };
        let marker = if stored { "" } else { "  (default)" };
        let _ = writeln!(out, "  {:<width$}  {value}{marker}", row.name);
    }
    out
}
