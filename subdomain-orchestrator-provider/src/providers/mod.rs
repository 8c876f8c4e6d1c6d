//! External-system client implementations.

#[cfg(feature = "cloudflare")]
mod cloudflare;
#[cfg(feature = "cpanel")]
mod cpanel;

#[cfg(feature = "cloudflare")]
pub use cloudflare::CloudflareDns;
#[cfg(feature = "cpanel")]
pub use cpanel::CpanelHost;
