// ─── Setter naming ──────────────────────────────────────────────────────────
//
//  property name        target field
//  ─────────────        ────────────
//  setUserName    ──►   userName       (prefix stripped, next char lowered)
//  setA           ──►   a
//  set_id         ──►   _id            (caseless chars count as uppercase)
//  settings       ──►   (none: char after prefix is lowercase)
//  set            ──►   (none: nothing after prefix)

/// Prefix every synthesized setter name starts with.
pub const SETTER_PREFIX: &str = "set";

/// Largest argument list any construction call shape accepts.
pub const MAX_CONSTRUCT_ARGS: usize = 2;
