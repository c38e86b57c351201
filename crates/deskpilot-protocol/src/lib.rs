#![deny(clippy::all)]

pub mod codec;
pub mod error_codes;
pub mod params;
mod recipe;
mod result;
pub mod timestamp;
mod types;

pub use codec::DecodeError;
pub use codec::decode_request;
pub use codec::decode_response;
pub use codec::encode_request;
pub use codec::encode_response;
pub use error_codes::ErrorCategory;
pub use error_codes::ErrorCode;
pub use params::FromParams;
pub use params::ParamError;
pub use recipe::Recipe;
pub use recipe::RecipeSource;
pub use recipe::RecipeStep;
pub use recipe::RecipeSummary;
pub use recipe::RecordedStep;
pub use recipe::Recording;
pub use result::ActionResult;
pub use result::AppInfo;
pub use result::ContentItem;
pub use result::ContextInfo;
pub use result::Element;
pub use result::ElementChange;
pub use result::Point;
pub use result::Rect;
pub use result::RpcResult;
pub use result::ScreenState;
pub use result::StateDiff;
pub use result::WindowInfo;
pub use types::ParamBag;
pub use types::ParamValue;
pub use types::Request;
pub use types::Response;
pub use types::RpcError;
