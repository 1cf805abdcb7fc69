// Inputid Event Codes
// Numeric constants from the input-event-codes table used by the classifier

// Key and button codes
pub const BTN_MISC: u16 = 0x100;
pub const BTN_LEFT: u16 = 0x110;
pub const BTN_RIGHT: u16 = 0x111;
pub const BTN_MIDDLE: u16 = 0x112;
pub const BTN_JOYSTICK: u16 = 0x120;
pub const BTN_TOOL_PEN: u16 = 0x140;
pub const BTN_TOOL_FINGER: u16 = 0x145;
pub const BTN_TOUCH: u16 = 0x14a;
pub const BTN_STYLUS: u16 = 0x14b;
pub const BTN_STYLUS2: u16 = 0x14c;
pub const KEY_CNT: u16 = 0x300;

// Relative axes
pub const REL_X: u16 = 0x00;
pub const REL_Y: u16 = 0x01;
pub const REL_CNT: u16 = 0x10;

// Absolute axes
pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_PRESSURE: u16 = 0x18;
pub const ABS_MT_SLOT: u16 = 0x2f;
pub const ABS_CNT: u16 = 0x40;

// Bus types
pub const BUS_PCI: u16 = 0x01;
pub const BUS_USB: u16 = 0x03;
pub const BUS_VIRTUAL: u16 = 0x06;
pub const BUS_ISA: u16 = 0x10;
pub const BUS_I8042: u16 = 0x11;

// Identity reported for legacy PS/2 devices behind the keyboard controller
pub const PS2_KEYBOARD_VENDOR: u32 = 0x001;
pub const PS2_KEYBOARD_PRODUCT: u32 = 0x001;
pub const PS2_MOUSE_VENDOR: u32 = 0x002;
pub const PS2_MOUSE_GENERIC_PRODUCT: u32 = 0x001;
