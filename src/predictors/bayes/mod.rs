mod naive_bayes;

pub use naive_bayes::{DEFAULT_VAR_SMOOTHING, NaiveBayes, NaiveBayesModel};
