pub mod auth;
pub mod category;
pub mod curtain;

pub use auth::{Credentials, ErrorBody, LoginResponse, User};
pub use category::{Category, CategoryId};
pub use curtain::{Curtain, CurtainForm, CurtainId, FormPart, ImageUpload, ALLOWED_IMAGE_EXTENSIONS};
