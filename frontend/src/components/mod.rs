//! UI components for Dimension Market.
//!
//! # Layout Components
//! - [`Header`] - Navigation bar with wallet connection
//! - [`Footer`] - Page footer
//! - [`WalletModal`] - Wallet connection dialog shared by every page
//!
//! # Pages
//! - [`ExplorePage`] - Catalog with category/sort/search mirrored in the URL
//! - [`AssetDetailPage`] - One asset plus the simulated purchase
//! - [`UploadPage`] - Three-step upload wizard
//! - [`ProfilePage`] - Creator page
//!
//! # Pieces
//! - [`AssetCard`] - Catalog grid tile

mod header;
mod footer;
mod wallet_modal;
mod asset_card;
mod catalog;
mod asset_detail;
mod upload;
mod profile;

pub use header::*;
pub use footer::*;
pub use wallet_modal::*;
pub use asset_card::*;
pub use catalog::*;
pub use asset_detail::*;
pub use upload::*;
pub use profile::*;
