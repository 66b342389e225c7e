use std::fmt;

/// States of the products normalization. Steps run strictly in this order;
/// [`MigrationStep::next`] never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MigrationStep {
    AddColumns,
    EnsureLookupTables,
    Backfill,
    CreateShadow,
    CopyRows,
    DropOriginal,
    RenameShadow,
    Complete,
}

impl MigrationStep {
    pub fn next(self) -> Self {
        match self {
            MigrationStep::AddColumns => MigrationStep::EnsureLookupTables,
            MigrationStep::EnsureLookupTables => MigrationStep::Backfill,
            MigrationStep::Backfill => MigrationStep::CreateShadow,
            MigrationStep::CreateShadow => MigrationStep::CopyRows,
            MigrationStep::CopyRows => MigrationStep::DropOriginal,
            MigrationStep::DropOriginal => MigrationStep::RenameShadow,
            MigrationStep::RenameShadow | MigrationStep::Complete => MigrationStep::Complete,
        }
    }

    /// Steps that replace the products table and run in the swap transaction.
    pub fn is_swap(self) -> bool {
        matches!(
            self,
            MigrationStep::CreateShadow
                | MigrationStep::CopyRows
                | MigrationStep::DropOriginal
                | MigrationStep::RenameShadow
        )
    }
}

impl fmt::Display for MigrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MigrationStep::AddColumns => "add-columns",
            MigrationStep::EnsureLookupTables => "ensure-lookup-tables",
            MigrationStep::Backfill => "backfill",
            MigrationStep::CreateShadow => "create-shadow",
            MigrationStep::CopyRows => "copy-rows",
            MigrationStep::DropOriginal => "drop-original",
            MigrationStep::RenameShadow => "rename-shadow",
            MigrationStep::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub harvested_categories: usize,
    pub harvested_locations: usize,
    pub default_category_id: Option<i64>,
    pub default_location_id: Option<i64>,
    pub rows_backfilled: u64,
    pub rows_copied: u64,
    pub swapped: bool,
    /// True when no products table existed and the store was only bootstrapped.
    pub nothing_to_migrate: bool,
    pub steps: Vec<MigrationStep>,
}
