/// Two clicks closer together than this are one double-click.
/// Strictly less-than: a click landing exactly on the boundary is a single click.
pub const DOUBLE_CLICK_INTERVAL_MS: u64 = 500;
