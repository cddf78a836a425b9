pub(crate) mod serde_ext;
