pub(crate) mod area;
pub(crate) mod density;
pub(crate) mod function;
pub(crate) mod heritage;
pub(crate) mod ownership;
pub(crate) mod pollution;
