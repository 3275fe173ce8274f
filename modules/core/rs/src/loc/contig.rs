use std::fmt::Debug;
use std::hash::Hash;

/// Contig names an assembly sequence (chromosome, scaffold, etc). Depending on
/// the context it can be a string, an interned id, or a plain number.
pub trait Contig:
    Hash + PartialEq + Eq + PartialOrd + Ord + Clone + Default + Debug + Send + Sync
{
}

impl<T: Hash + PartialEq + Eq + PartialOrd + Ord + Clone + Default + Debug + Send + Sync> Contig
    for T
{
}
