//! Feature names of the transformer output space
//!
//! The only place that knows how transformer metadata maps to readable
//! names; everything else goes through `FeatureNames`.

use crate::constants::ONE_HOT_SEPARATOR;
use crate::logic::model::ColumnTransformer;

/// Output feature names of a fitted transformer, in output order
pub trait FeatureNames {
    fn output_feature_names(&self) -> Vec<String>;
}

impl FeatureNames for ColumnTransformer {
    fn output_feature_names(&self) -> Vec<String> {
        let numeric = self.numeric.iter().map(|c| c.column.clone());
        let one_hot = self.categorical.iter().flat_map(|c| {
            c.categories
                .iter()
                .map(move |category| format!("{}{}{}", c.column, ONE_HOT_SEPARATOR, category))
        });
        numeric.chain(one_hot).collect()
    }
}
