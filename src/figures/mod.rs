//! The catalogue of course figures.
//!
//! Every figure is a pure function of the [`Theme`]: it lays out literal
//! shapes and strings on a fixed canvas and returns the [`Scene`].

mod aggregates;
mod axes;
mod btree;
mod group_by;
mod joins;
mod relational;
mod table;
mod transaction;

use crate::render::OutputFormat;
use crate::scene::Scene;
use crate::theme::Theme;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use aggregates::AGGREGATE_FUNCTIONS;
pub use btree::LEAF_KEYS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Figure {
    RelationalModel,
    KeysConstraints,
    BTree,
    TransactionFlow,
    JoinVenn,
    JoinResults,
    JoinAlgorithms,
    GroupBy,
    CountComparison,
    NullAggregation,
    AggregateFunctions,
}

impl Figure {
    pub const ALL: [Figure; 11] = [
        Figure::RelationalModel,
        Figure::KeysConstraints,
        Figure::BTree,
        Figure::TransactionFlow,
        Figure::JoinVenn,
        Figure::JoinResults,
        Figure::JoinAlgorithms,
        Figure::GroupBy,
        Figure::CountComparison,
        Figure::NullAggregation,
        Figure::AggregateFunctions,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Figure::RelationalModel => "relational-model",
            Figure::KeysConstraints => "keys-constraints",
            Figure::BTree => "btree",
            Figure::TransactionFlow => "transaction-flow",
            Figure::JoinVenn => "join-venn",
            Figure::JoinResults => "join-results",
            Figure::JoinAlgorithms => "join-algorithms",
            Figure::GroupBy => "group-by",
            Figure::CountComparison => "count-comparison",
            Figure::NullAggregation => "null-aggregation",
            Figure::AggregateFunctions => "aggregate-functions",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Figure::RelationalModel => "Relational Model diagram",
            Figure::KeysConstraints => "Keys & Constraints diagram",
            Figure::BTree => "B-Tree diagram",
            Figure::TransactionFlow => "Transaction Flow diagram",
            Figure::JoinVenn => "JOIN Venn Diagrams",
            Figure::JoinResults => "JOIN Results Example",
            Figure::JoinAlgorithms => "JOIN Algorithms Comparison",
            Figure::GroupBy => "GROUP BY Visualization",
            Figure::CountComparison => "COUNT Comparison",
            Figure::NullAggregation => "NULL Aggregation Behavior",
            Figure::AggregateFunctions => "Aggregate Functions table",
        }
    }

    /// Output path relative to the output directory, without extension.
    pub fn output_stem(self) -> &'static str {
        match self {
            Figure::RelationalModel => "q1_relational_model_diagram",
            Figure::KeysConstraints => "q2_keys_constraints_diagram",
            Figure::BTree => "diagrams/btree",
            Figure::TransactionFlow => "diagrams/transaction_flow",
            Figure::JoinVenn => "join_venn_diagrams_green",
            Figure::JoinResults => "join_results_example_green",
            Figure::JoinAlgorithms => "join_algorithms_comparison_green",
            Figure::GroupBy => "groupby_visualization_green",
            Figure::CountComparison => "count_comparison_green",
            Figure::NullAggregation => "null_aggregation_behavior_green",
            Figure::AggregateFunctions => "aggregate_functions_table",
        }
    }

    pub fn output_path(self, dir: &Path, format: OutputFormat) -> PathBuf {
        dir.join(format!("{}.{}", self.output_stem(), format.extension()))
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|figure| figure.id() == id)
    }

    pub fn build(self, theme: &Theme) -> Scene {
        match self {
            Figure::RelationalModel => relational::relational_model(theme),
            Figure::KeysConstraints => relational::keys_constraints(theme),
            Figure::BTree => btree::btree(theme),
            Figure::TransactionFlow => transaction::transaction_flow(theme),
            Figure::JoinVenn => joins::join_venn(theme),
            Figure::JoinResults => joins::join_results(theme),
            Figure::JoinAlgorithms => joins::join_algorithms(theme),
            Figure::GroupBy => group_by::group_by(theme),
            Figure::CountComparison => aggregates::count_comparison(theme),
            Figure::NullAggregation => aggregates::null_aggregation(theme),
            Figure::AggregateFunctions => aggregates::aggregate_functions(theme),
        }
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Figure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Figure::from_id(s).ok_or_else(|| {
            let known: Vec<&str> = Figure::ALL.iter().map(|figure| figure.id()).collect();
            format!("unknown figure `{s}` (expected one of: {})", known.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_and_stems_are_unique() {
        let ids: HashSet<&str> = Figure::ALL.iter().map(|f| f.id()).collect();
        let stems: HashSet<&str> = Figure::ALL.iter().map(|f| f.output_stem()).collect();
        assert_eq!(ids.len(), Figure::ALL.len());
        assert_eq!(stems.len(), Figure::ALL.len());
    }

    #[test]
    fn ids_round_trip_through_from_str() {
        for figure in Figure::ALL {
            assert_eq!(figure.id().parse::<Figure>(), Ok(figure));
        }
        let err = "venn".parse::<Figure>().unwrap_err();
        assert!(err.contains("join-venn"));
    }

    #[test]
    fn output_path_keeps_subdirectory() {
        let path = Figure::BTree.output_path(Path::new("out"), OutputFormat::Png);
        assert_eq!(path, Path::new("out").join("diagrams/btree.png"));
    }

    #[test]
    fn every_figure_fits_its_canvas() {
        let theme = Theme::default();
        for figure in Figure::ALL {
            let scene = figure.build(&theme);
            assert!(!scene.is_empty(), "{figure}: empty scene");
            for instruction in scene.instructions() {
                let (x, y, w, h) = instruction.bounds();
                assert!(
                    x >= -1.0 && y >= -1.0 && x + w <= scene.width + 1.0 && y + h <= scene.height + 1.0,
                    "{figure}: {} at ({x}, {y}, {w}, {h}) leaves the {}x{} canvas",
                    instruction.kind(),
                    scene.width,
                    scene.height
                );
            }
        }
    }
}
