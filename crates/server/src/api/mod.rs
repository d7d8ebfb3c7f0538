mod meet;

pub use meet::meet;
