pub mod crop;
pub mod info;
pub mod script;
