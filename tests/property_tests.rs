#[cfg(test)]
mod property_tests {
    use minerva::activations::Activation;
    use minerva::builders::NetworkBuilder;
    use minerva::cost::CrossEntropy;
    use minerva::layers::{DenseLayer, InputLayer, WeightInit};
    use minerva::optimizer::Sgd;
    use ndarray::{Array1, Array2};
    use proptest::prelude::*;

    // Strategy for generating valid layer sizes
    fn layer_sizes_strategy() -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(1usize..=16, 2..=4)
    }

    // Strategy for generating finite input vectors
    fn input_array_strategy(size: usize) -> impl Strategy<Value = Array1<f64>> {
        prop::collection::vec(-10.0f64..10.0, size).prop_map(Array1::from_vec)
    }

    // Strategy for generating finite weight matrices
    fn weight_matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = Array2<f64>> {
        prop::collection::vec(-5.0f64..5.0, rows * cols)
            .prop_map(move |v| Array2::from_shape_vec((rows, cols), v).unwrap())
    }

    proptest! {
        #[test]
        fn forward_output_matches_last_layer_size(layer_sizes in layer_sizes_strategy()) {
            let mut builder = NetworkBuilder::new().input(layer_sizes[0]);
            for &units in &layer_sizes[1..] {
                builder = builder.dense(units, Activation::Sigmoid);
            }
            let network = builder
                .cost(Box::new(CrossEntropy))
                .optimizer(Box::new(Sgd::default()))
                .build()
                .unwrap();

            let input = Array1::zeros(layer_sizes[0]);
            let output = network.predict(input.view()).unwrap();
            prop_assert_eq!(output.len(), *layer_sizes.last().unwrap());
        }

        #[test]
        fn sigmoid_network_outputs_stay_in_unit_interval(
            input in input_array_strategy(4)
        ) {
            let network = NetworkBuilder::new()
                .input(4)
                .dense(3, Activation::Sigmoid)
                .dense(2, Activation::Sigmoid)
                .cost(Box::new(CrossEntropy))
                .optimizer(Box::new(Sgd::default()))
                .build()
                .unwrap();

            let output = network.predict(input.view()).unwrap();
            for &v in output.iter() {
                prop_assert!((0.0..=1.0).contains(&v), "sigmoid output out of bounds: {}", v);
            }
        }

        #[test]
        fn dense_pre_activation_equals_augmented_product(
            weights in weight_matrix_strategy(3, 5),
            input in input_array_strategy(4)
        ) {
            let mut layer = DenseLayer::with_weights(3, weights.clone(), Activation::Sigmoid);
            layer.initialize_weights(4).unwrap();

            let z = layer.pre_activation(input.view()).unwrap();
            for i in 0..3 {
                let mut expected = weights[[i, 0]];
                for j in 0..4 {
                    expected += weights[[i, j + 1]] * input[j];
                }
                prop_assert!((z[i] - expected).abs() < 1e-9);
            }
        }

        #[test]
        fn zero_delta_never_changes_weights(
            weights in weight_matrix_strategy(3, 5)
        ) {
            let mut layer = DenseLayer::with_weights(3, weights.clone(), Activation::Sigmoid);
            layer.initialize_weights(4).unwrap();

            layer.apply_update(&Array2::zeros((3, 5))).unwrap();
            prop_assert_eq!(layer.weights().unwrap(), &weights);
        }

        #[test]
        fn input_layer_passes_any_vector_through(
            values in input_array_strategy(6)
        ) {
            let layer = InputLayer::new(6);
            prop_assert_eq!(layer.activate(values.view()).unwrap(), values.clone());
            prop_assert_eq!(layer.backpropagate(values.view()).unwrap(), values);
        }

        #[test]
        fn initializers_produce_bias_augmented_shapes(
            input_size in 1usize..=12,
            units in 1usize..=12
        ) {
            for init in [WeightInit::HeNormal, WeightInit::GlorotNormal, WeightInit::Zeros] {
                let weights = init.generate(input_size, units);
                prop_assert_eq!(weights.dim(), (units, input_size + 1));
                for i in 0..units {
                    prop_assert_eq!(weights[[i, 0]], 0.0);
                }
            }
        }
    }
}
