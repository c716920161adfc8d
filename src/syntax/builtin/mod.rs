//! Built-in language profiles

pub(crate) mod cpp;
pub(crate) mod python;

pub use cpp::cpp_profile;
pub use python::python_profile;
