use crate::config::choices::Choice;
use crate::predictors::bayes::{DEFAULT_VAR_SMOOTHING, NaiveBayes};
use crate::predictors::forest::RandomForest;
use crate::predictors::tree::{DecisionTree, MaxFeatures, TreeParams};
use crate::predictors::{Learner, TaskKind};
use anyhow::{Context, bail, ensure};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

const DEFAULT_N_ESTIMATORS: usize = 100;

fn default_min_samples_split() -> usize {
    2
}

fn default_min_samples_leaf() -> usize {
    1
}

fn default_max_features() -> MaxFeatures {
    MaxFeatures::All
}

fn default_n_estimators() -> usize {
    DEFAULT_N_ESTIMATORS
}

fn default_bootstrap() -> bool {
    true
}

fn default_var_smoothing() -> f64 {
    DEFAULT_VAR_SMOOTHING
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TreeParameters {
    #[serde(default)]
    #[schemars(
        title = "Max Depth",
        description = "Deepest split level (None = grow until leaves are pure)",
        range(min = 1)
    )]
    pub max_depth: Option<usize>,

    #[serde(default = "default_min_samples_split")]
    #[schemars(
        title = "Min Samples Split",
        description = "Smallest node that may still be split",
        range(min = 2),
        default = "default_min_samples_split"
    )]
    pub min_samples_split: usize,

    #[serde(default = "default_min_samples_leaf")]
    #[schemars(
        title = "Min Samples Leaf",
        description = "Smallest number of samples left on each side of a split",
        range(min = 1),
        default = "default_min_samples_leaf"
    )]
    pub min_samples_leaf: usize,

    #[serde(default = "default_max_features")]
    #[schemars(
        title = "Max Features",
        description = "Features considered per split: all, sqrt or log2",
        default = "default_max_features"
    )]
    pub max_features: MaxFeatures,

    #[serde(default)]
    #[schemars(title = "Seed", description = "PRNG seed (None = draw one when fitting)")]
    pub seed: Option<u64>,
}

impl Default for TreeParameters {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: default_min_samples_split(),
            min_samples_leaf: default_min_samples_leaf(),
            max_features: default_max_features(),
            seed: None,
        }
    }
}

impl TreeParameters {
    fn tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            min_samples_leaf: self.min_samples_leaf,
            max_features: self.max_features,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ForestParameters {
    #[serde(default = "default_n_estimators")]
    #[schemars(
        title = "Trees",
        description = "Number of trees in the forest",
        range(min = 1),
        default = "default_n_estimators"
    )]
    pub n_estimators: usize,

    #[serde(default = "default_bootstrap")]
    #[schemars(
        title = "Bootstrap",
        description = "Grow each tree on a bootstrap resample?",
        default = "default_bootstrap"
    )]
    pub bootstrap: bool,

    #[serde(default)]
    #[schemars(
        title = "Max Depth",
        description = "Deepest split level (None = grow until leaves are pure)",
        range(min = 1)
    )]
    pub max_depth: Option<usize>,

    #[serde(default = "default_min_samples_split")]
    #[schemars(
        title = "Min Samples Split",
        description = "Smallest node that may still be split",
        range(min = 2),
        default = "default_min_samples_split"
    )]
    pub min_samples_split: usize,

    #[serde(default = "default_min_samples_leaf")]
    #[schemars(
        title = "Min Samples Leaf",
        description = "Smallest number of samples left on each side of a split",
        range(min = 1),
        default = "default_min_samples_leaf"
    )]
    pub min_samples_leaf: usize,

    #[serde(default)]
    #[schemars(
        title = "Max Features",
        description = "Features considered per split (None = sqrt for classifiers, all for regressors)"
    )]
    pub max_features: Option<MaxFeatures>,

    #[serde(default)]
    #[schemars(title = "Seed", description = "PRNG seed (None = draw one when fitting)")]
    pub seed: Option<u64>,
}

impl Default for ForestParameters {
    fn default() -> Self {
        Self {
            n_estimators: DEFAULT_N_ESTIMATORS,
            bootstrap: true,
            max_depth: None,
            min_samples_split: default_min_samples_split(),
            min_samples_leaf: default_min_samples_leaf(),
            max_features: None,
            seed: None,
        }
    }
}

impl ForestParameters {
    fn forest(&self, mut forest: RandomForest) -> RandomForest {
        let defaults = *forest.tree_params();
        forest = forest
            .with_bootstrap(self.bootstrap)
            .with_tree_params(TreeParams {
                max_depth: self.max_depth,
                min_samples_split: self.min_samples_split,
                min_samples_leaf: self.min_samples_leaf,
                max_features: self.max_features.unwrap_or(defaults.max_features),
            });
        match self.seed {
            Some(seed) => forest.with_seed(seed),
            None => forest,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NaiveBayesParameters {
    #[serde(default = "default_var_smoothing")]
    #[schemars(
        title = "Variance Smoothing",
        description = "Fraction of the largest feature variance added to every variance",
        range(min = 0.0),
        default = "default_var_smoothing"
    )]
    pub var_smoothing: f64,
}

impl Default for NaiveBayesParameters {
    fn default() -> Self {
        Self {
            var_smoothing: DEFAULT_VAR_SMOOTHING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(LearnerKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum LearnerChoice {
    #[strum_discriminants(strum(
        message = "Decision Tree Classifier",
        detailed_message = "Single CART tree split on Gini impurity."
    ))]
    DecisionTreeClassifier(TreeParameters),

    #[strum_discriminants(strum(
        message = "Decision Tree Regressor",
        detailed_message = "Single CART tree split on variance reduction."
    ))]
    DecisionTreeRegressor(TreeParameters),

    #[strum_discriminants(strum(
        message = "Random Forest Classifier",
        detailed_message = "Bagged trees voting with averaged class probabilities."
    ))]
    RandomForestClassifier(ForestParameters),

    #[strum_discriminants(strum(
        message = "Random Forest Regressor",
        detailed_message = "Bagged trees averaging their predictions."
    ))]
    RandomForestRegressor(ForestParameters),

    #[strum_discriminants(strum(
        message = "Naive Bayes",
        detailed_message = "Gaussian likelihood per feature and class."
    ))]
    NaiveBayes(NaiveBayesParameters),
}

impl LearnerChoice {
    pub fn kind(&self) -> LearnerKind {
        LearnerKind::from(self)
    }

    pub fn task(&self) -> TaskKind {
        match self {
            LearnerChoice::DecisionTreeClassifier(_)
            | LearnerChoice::RandomForestClassifier(_)
            | LearnerChoice::NaiveBayes(_) => TaskKind::Classification,
            LearnerChoice::DecisionTreeRegressor(_) | LearnerChoice::RandomForestRegressor(_) => {
                TaskKind::Regression
            }
        }
    }

    pub fn seed(&self) -> Option<u64> {
        match self {
            LearnerChoice::DecisionTreeClassifier(p) | LearnerChoice::DecisionTreeRegressor(p) => {
                p.seed
            }
            LearnerChoice::RandomForestClassifier(p) | LearnerChoice::RandomForestRegressor(p) => {
                p.seed
            }
            LearnerChoice::NaiveBayes(_) => None,
        }
    }

    /// Rejects parameter values the learners would otherwise silently clamp.
    pub fn validate(&self) -> anyhow::Result<()> {
        match self {
            LearnerChoice::DecisionTreeClassifier(p) | LearnerChoice::DecisionTreeRegressor(p) => {
                check_tree_limits(p.max_depth, p.min_samples_split, p.min_samples_leaf)
            }
            LearnerChoice::RandomForestClassifier(p) | LearnerChoice::RandomForestRegressor(p) => {
                ensure!(p.n_estimators >= 1, "n_estimators must be at least 1");
                check_tree_limits(p.max_depth, p.min_samples_split, p.min_samples_leaf)
            }
            LearnerChoice::NaiveBayes(p) => {
                if !p.var_smoothing.is_finite() || p.var_smoothing < 0.0 {
                    bail!("var_smoothing must be a finite, non-negative number");
                }
                Ok(())
            }
        }
    }

    pub fn build_learner(&self) -> Box<dyn Learner> {
        match self {
            LearnerChoice::DecisionTreeClassifier(p) => {
                with_tree_seed(DecisionTree::classifier(p.tree_params()), p.seed)
            }
            LearnerChoice::DecisionTreeRegressor(p) => {
                with_tree_seed(DecisionTree::regressor(p.tree_params()), p.seed)
            }
            LearnerChoice::RandomForestClassifier(p) => {
                Box::new(p.forest(RandomForest::classifier(p.n_estimators)))
            }
            LearnerChoice::RandomForestRegressor(p) => {
                Box::new(p.forest(RandomForest::regressor(p.n_estimators)))
            }
            LearnerChoice::NaiveBayes(p) => Box::new(NaiveBayes::new(p.var_smoothing)),
        }
    }
}

fn with_tree_seed(tree: DecisionTree, seed: Option<u64>) -> Box<dyn Learner> {
    match seed {
        Some(seed) => Box::new(tree.with_seed(seed)),
        None => Box::new(tree),
    }
}

fn check_tree_limits(
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
) -> anyhow::Result<()> {
    ensure!(max_depth != Some(0), "max_depth must be at least 1");
    ensure!(min_samples_split >= 2, "min_samples_split must be at least 2");
    ensure!(min_samples_leaf >= 1, "min_samples_leaf must be at least 1");
    Ok(())
}

impl Choice for LearnerChoice {
    type Kind = LearnerKind;

    fn schema() -> Schema {
        schema_for!(LearnerChoice)
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            LearnerKind::DecisionTreeClassifier | LearnerKind::DecisionTreeRegressor => json!({
                "max_depth": null,
                "min_samples_split": 2,
                "min_samples_leaf": 1,
                "max_features": "all",
                "seed": null
            }),
            LearnerKind::RandomForestClassifier => json!({
                "n_estimators": DEFAULT_N_ESTIMATORS,
                "bootstrap": true,
                "max_depth": null,
                "min_samples_split": 2,
                "min_samples_leaf": 1,
                "max_features": "sqrt",
                "seed": null
            }),
            LearnerKind::RandomForestRegressor => json!({
                "n_estimators": DEFAULT_N_ESTIMATORS,
                "bootstrap": true,
                "max_depth": null,
                "min_samples_split": 2,
                "min_samples_leaf": 1,
                "max_features": "all",
                "seed": null
            }),
            LearnerKind::NaiveBayes => json!({
                "var_smoothing": DEFAULT_VAR_SMOOTHING
            }),
        }
    }

    fn from_parts(kind: Self::Kind, params: Value) -> anyhow::Result<Self> {
        let choice = match kind {
            LearnerKind::DecisionTreeClassifier => {
                LearnerChoice::DecisionTreeClassifier(serde_json::from_value(params)?)
            }
            LearnerKind::DecisionTreeRegressor => {
                LearnerChoice::DecisionTreeRegressor(serde_json::from_value(params)?)
            }
            LearnerKind::RandomForestClassifier => {
                LearnerChoice::RandomForestClassifier(serde_json::from_value(params)?)
            }
            LearnerKind::RandomForestRegressor => {
                LearnerChoice::RandomForestRegressor(serde_json::from_value(params)?)
            }
            LearnerKind::NaiveBayes => LearnerChoice::NaiveBayes(serde_json::from_value(params)?),
        };
        choice
            .validate()
            .with_context(|| format!("invalid {kind} parameters"))?;
        Ok(choice)
    }
}
