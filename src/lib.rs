pub mod linkopen;
pub mod message;
pub mod richtext;
