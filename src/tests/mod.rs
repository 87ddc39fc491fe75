pub mod test_cost;
pub mod test_layers;
