//! Built-in device catalog.
//!
//! Static device tables in the same shape an emulator core registers
//! them: each schema is closed by `FieldDescriptor::END`, each choice list
//! by `Choice::END`.

use devconf_core::{Bus, Choice, DeviceSchema, DeviceType, FieldDescriptor, SelectionFlavor};

// ── Shared choice lists ──────────────────────────────────────────────

const IRQS: &[Choice] = &[
    Choice::new("IRQ 2", 2),
    Choice::new("IRQ 3", 3),
    Choice::new("IRQ 5", 5),
    Choice::new("IRQ 7", 7),
    Choice::new("IRQ 10", 10),
    Choice::new("IRQ 11", 11),
    Choice::END,
];

const MIDI_OUT: &[Choice] = &[
    Choice::new("None", 0),
    Choice::new("System MIDI", 1),
    Choice::new("FluidSynth", 2),
    Choice::new("Roland MT-32 Emulation", 3),
    Choice::END,
];

const MIDI_IN: &[Choice] = &[
    Choice::new("None", 0),
    Choice::new("System MIDI input", 1),
    Choice::END,
];

// ── Sound Blaster 16 ─────────────────────────────────────────────────

const SB16_BASES: &[Choice] = &[
    Choice::new("0x220", 0x220),
    Choice::new("0x240", 0x240),
    Choice::new("0x260", 0x260),
    Choice::new("0x280", 0x280),
    Choice::END,
];

const SB16_DMA: &[Choice] = &[
    Choice::new("DMA 0", 0),
    Choice::new("DMA 1", 1),
    Choice::new("DMA 3", 3),
    Choice::END,
];

const SB16_HDMA: &[Choice] = &[
    Choice::new("DMA 5", 5),
    Choice::new("DMA 6", 6),
    Choice::new("DMA 7", 7),
    Choice::END,
];

const SB16_CONFIG: &[FieldDescriptor] = &[
    FieldDescriptor::selection_flavor("base", "Address", SelectionFlavor::Hex16, SB16_BASES, 0x220),
    FieldDescriptor::selection("irq", "IRQ", IRQS, 5),
    FieldDescriptor::selection("dma", "Low DMA channel", SB16_DMA, 1),
    FieldDescriptor::selection("dma16", "High DMA channel", SB16_HDMA, 5),
    FieldDescriptor::selection_flavor(
        "midi",
        "MIDI out device",
        SelectionFlavor::Midi,
        MIDI_OUT,
        0,
    ),
    FieldDescriptor::binary("opl", "Enable OPL", true),
    FieldDescriptor::binary("receive_input", "Receive input (SB MIDI)", true),
    FieldDescriptor::END,
];

pub static SB16: DeviceType = DeviceType {
    name: "Sound Blaster 16",
    internal_name: "sb16",
    bus: Some(Bus::Isa16),
    schema: DeviceSchema::new(SB16_CONFIG),
};

// ── MPU-401 ──────────────────────────────────────────────────────────

const MPU_BASES: &[Choice] = &[
    Choice::new("0x300", 0x300),
    Choice::new("0x330", 0x330),
    Choice::new("0x332", 0x332),
    Choice::END,
];

const MPU401_CONFIG: &[FieldDescriptor] = &[
    FieldDescriptor::selection_flavor("base", "Address", SelectionFlavor::Hex16, MPU_BASES, 0x330),
    FieldDescriptor::selection("irq", "IRQ", IRQS, 2),
    FieldDescriptor::selection_flavor(
        "midi_in",
        "MIDI in device",
        SelectionFlavor::MidiIn,
        MIDI_IN,
        0,
    ),
    FieldDescriptor::binary("receive_input", "Receive input", true),
    FieldDescriptor::END,
];

pub static MPU401: DeviceType = DeviceType {
    name: "Roland MPU-401",
    internal_name: "mpu401",
    bus: Some(Bus::Isa),
    schema: DeviceSchema::new(MPU401_CONFIG),
};

// ── NE2000 ───────────────────────────────────────────────────────────

const NE2K_BASES: &[Choice] = &[
    Choice::new("0x280", 0x280),
    Choice::new("0x300", 0x300),
    Choice::new("0x320", 0x320),
    Choice::new("0x340", 0x340),
    Choice::new("0x360", 0x360),
    Choice::END,
];

const NE2K_BIOS: &[Choice] = &[
    Choice::new("Disabled", 0),
    Choice::new("C800", 0xC8000),
    Choice::new("CC00", 0xCC000),
    Choice::new("D000", 0xD0000),
    Choice::new("D400", 0xD4000),
    Choice::END,
];

const NE2K_CONFIG: &[FieldDescriptor] = &[
    FieldDescriptor::selection_flavor("base", "Address", SelectionFlavor::Hex16, NE2K_BASES, 0x300),
    FieldDescriptor::selection("irq", "IRQ", IRQS, 3),
    FieldDescriptor::selection_flavor(
        "bios_addr",
        "BIOS address",
        SelectionFlavor::Hex20,
        NE2K_BIOS,
        0,
    ),
    FieldDescriptor::END,
];

pub static NE2000: DeviceType = DeviceType {
    name: "Novell NE2000",
    internal_name: "ne2k",
    bus: Some(Bus::Isa),
    schema: DeviceSchema::new(NE2K_CONFIG),
};

// ── Generic ROM board ────────────────────────────────────────────────

const ROM_ADDRESSES: &[Choice] = &[
    Choice::new("C800", 0xC8000),
    Choice::new("D000", 0xD0000),
    Choice::new("D800", 0xD8000),
    Choice::new("E000", 0xE0000),
    Choice::END,
];

const ROM_BOARD_CONFIG: &[FieldDescriptor] = &[
    FieldDescriptor::selection_flavor(
        "bios_addr",
        "Address",
        SelectionFlavor::Hex20,
        ROM_ADDRESSES,
        0xD0000,
    ),
    FieldDescriptor::file_name("bios_fn", "ROM image", "ROM images (*.rom *.bin)", ""),
    FieldDescriptor::spinner("size", "Size (KB)", 8, 64, 8, 32),
    FieldDescriptor::binary("writable", "Writable (flash)", false),
    FieldDescriptor::END,
];

pub static ROM_BOARD: DeviceType = DeviceType {
    name: "Generic ISA ROM Board",
    internal_name: "isarom",
    bus: Some(Bus::Isa),
    schema: DeviceSchema::new(ROM_BOARD_CONFIG),
};

// ── Cassette ─────────────────────────────────────────────────────────

const CASSETTE_CONFIG: &[FieldDescriptor] = &[
    FieldDescriptor::new_file_name(
        "tape",
        "Tape image",
        "Cassette images (*.pcm *.raw *.wav *.cas)",
        "",
    ),
    FieldDescriptor::spinner("position", "Tape position (s)", 0, 3600, 0, 0),
    FieldDescriptor::binary("write_protect", "Write protected", false),
    FieldDescriptor::END,
];

pub static CASSETTE: DeviceType = DeviceType {
    name: "Cassette Drive",
    internal_name: "cassette",
    bus: None,
    schema: DeviceSchema::new(CASSETTE_CONFIG),
};

// ── PC speaker (nothing to configure) ────────────────────────────────

pub static PC_SPEAKER: DeviceType = DeviceType {
    name: "PC Speaker",
    internal_name: "speaker",
    bus: None,
    schema: DeviceSchema::EMPTY,
};

// ── Lookup ───────────────────────────────────────────────────────────

/// Every built-in device, in listing order.
pub static DEVICES: &[&DeviceType] = &[&SB16, &MPU401, &NE2000, &ROM_BOARD, &CASSETTE, &PC_SPEAKER];

pub fn find(internal_name: &str) -> Option<&'static DeviceType> {
    DEVICES
        .iter()
        .copied()
        .find(|d| d.internal_name == internal_name)
}
