// Backend core for a mental-health patient app.
//
// **Architecture Overview:**
// - `core/` = Business logic (transport-agnostic services and store traits)
// - `infra/` = Implementations of core traits (HTTP classifier, stores)
//
// The HTTP layer that exposes these services lives outside this crate and
// consumes the service types directly. The one subsystem with real
// decision logic is the moderation gate in `core::moderation`: community
// submissions go through it before anything is persisted, and any
// ambiguity or classifier failure blocks the content.

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
pub mod core;
#[path = "infra/infra_layer.rs"]
pub mod infra;
