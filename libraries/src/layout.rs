/// One engine-level storage location of a built-in class.
///
/// `offset` is the first slot, `span` the number of consecutive slots the
/// engine reserves there. A field bound to a slot must cover the span exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageSlot {
    pub name: &'static str,
    pub offset: u16,
    pub span: u16,
}

impl StorageSlot {
    pub fn end(&self) -> u16 {
        self.offset + self.span
    }
}

const fn slot(name: &'static str, offset: u16, span: u16) -> StorageSlot {
    StorageSlot { name, offset, span }
}

// THE SINGLE SOURCE OF TRUTH for ffc storage.
// Offsets must match the engine's ffc variable table; the order here is the
// order of the engine's slots.
pub const FFC_LAYOUT: &[StorageSlot] = &[
    slot("DATA", 0, 1),
    slot("FFSCRIPT", 1, 1),
    slot("FCSET", 2, 1),
    slot("DELAY", 3, 1),
    slot("FX", 4, 1),
    slot("FY", 5, 1),
    slot("XD", 6, 1),
    slot("YD", 7, 1),
    slot("XD2", 8, 1),
    slot("YD2", 9, 1),
    slot("FFFLAGSD", 10, 2),
    slot("FFTWIDTH", 12, 1),
    slot("FFTHEIGHT", 13, 1),
    slot("FFCWIDTH", 14, 1),
    slot("FFCHEIGHT", 15, 1),
    slot("FFLINK", 16, 1),
    slot("FFMISCD", 17, 16),
    slot("FFINITDD", 33, 8),
    slot("FFDD", 41, 8),
    slot("FFCID", 49, 1),
];

// Expected slot count — update this when the engine adds ffc variables.
pub const FFC_SLOT_COUNT: usize = 20;
const _: () = assert!(
    FFC_LAYOUT.len() == FFC_SLOT_COUNT,
    "FFC_LAYOUT length changed — update FFC_SLOT_COUNT"
);

/// Total storage slots of one ffc.
pub const FFC_STORAGE_SIZE: u16 = 50;

pub fn find_slot(layout: &[StorageSlot], name: &str) -> Option<StorageSlot> {
    layout.iter().find(|s| s.name == name).copied()
}
