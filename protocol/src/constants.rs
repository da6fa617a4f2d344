//! DHCP message constants.

/// The server listens on this port.
pub const DHCP_PORT_SERVER: u16 = 67;

/// Replies are sent to this port.
pub const DHCP_PORT_CLIENT: u16 = 68;

/// `client_hardware_address` size in bytes.
pub const SIZE_HARDWARE_ADDRESS: usize = 16;

/// `server_name` size in bytes.
pub const SIZE_SERVER_NAME: usize = 64;

/// `boot_filename` size in bytes.
pub const SIZE_BOOT_FILENAME: usize = 128;

/// 1 byte tag and 1 byte length before each DHCP option.
pub const SIZE_OPTION_PREFIX: usize = 2;

/// The `client_hardware_address` field offset in bytes.
pub const OFFSET_HARDWARE_ADDRESS: usize = 28;

/// The `server_name` field offset in bytes.
pub const OFFSET_SERVER_NAME: usize = OFFSET_HARDWARE_ADDRESS + SIZE_HARDWARE_ADDRESS;

/// The `boot_filename` field offset in bytes.
pub const OFFSET_BOOT_FILENAME: usize = OFFSET_SERVER_NAME + SIZE_SERVER_NAME;

/// DHCP options magic cookie offset in bytes. Also the size of the fixed BOOTP header.
pub const OFFSET_MAGIC_COOKIE: usize = OFFSET_BOOT_FILENAME + SIZE_BOOT_FILENAME;

/// DHCP options themselves offset in bytes.
pub const OFFSET_OPTIONS: usize = OFFSET_MAGIC_COOKIE + ::std::mem::size_of::<u32>();

/// Only the highest bit of the `flags` field is used in DHCP.
pub const FLAG_BROADCAST: u16 = 0b1000_0000_0000_0000;

/// The magic number before the DHCP options.
pub const MAGIC_COOKIE: u32 = 0x6382_5363;

/// The padding option code.
pub const OPTION_PAD: u8 = 0;

/// The option list terminator code.
pub const OPTION_END: u8 = 255;
