//! Captcha module - image captcha rendering

pub mod font;
pub mod image_captcha;


pub use image_captcha::{random_answer, render_png, ImageCaptchaRenderer, DATA_URI_PREFIX};
