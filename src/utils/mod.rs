//! Shared helpers.
//!
//! - [`string_utils`] - optional string cleanup
//! - [`display_terminal`] - startup banners
//!
//! ```rust,ignore
//! use shop_services::utils::display_terminal::print_boxed_title;
//! use shop_services::utils::string_utils::clean_optional_string;
//!
//! print_boxed_title("order-service");
//! let street = clean_optional_string(request.street);
//! ```

pub mod display_terminal;
pub mod string_utils;
