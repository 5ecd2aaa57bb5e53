pub mod egui_mpsc;
pub mod tasks;

#[cfg(test)]
pub(crate) mod test_providers;
