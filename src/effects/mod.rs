pub(crate) mod fade;
