use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use itertools::Itertools;

use intrex_core_rs::loc::{Interval, IntervalOp};
use intrex_core_rs::num::PrimInt;

/// A single named repeat occurrence, as annotated. Occurrences may overlap
/// each other freely and may extend past the region of interest.
#[derive(Clone, PartialEq, Eq, Debug, Constructor, Dissolve, Getters)]
pub struct RepeatAnnotation<Idx: PrimInt> {
    interval: Interval<Idx>,
    name: String,
}

/// A maximal run of overlapping or zero-gap repeat occurrences, clipped to
/// the region it was collapsed against. Carries the sorted, deduplicated
/// names of every occurrence that contributed to the run.
#[derive(Clone, PartialEq, Eq, Debug, Dissolve, Getters)]
pub struct CollapsedRepeat<Idx: PrimInt> {
    interval: Interval<Idx>,
    names: Vec<String>,
}

impl<Idx: PrimInt> CollapsedRepeat<Idx> {
    fn assemble(interval: Interval<Idx>, names: &[&str]) -> Self {
        let names = names
            .iter()
            .sorted()
            .dedup()
            .map(|x| x.to_string())
            .collect();
        Self { interval, names }
    }

    /// All contributing repeat names as a single `;`-separated label.
    pub fn label(&self) -> String {
        self.names.join(";")
    }
}

/// Merge repeat occurrences into sorted, pairwise non-overlapping runs
/// clipped to `bound`. Occurrences fully outside `bound` are dropped; runs
/// separated by a gap of zero bases are merged into one.
pub fn collapse<Idx: PrimInt>(
    repeats: &[RepeatAnnotation<Idx>],
    bound: &Interval<Idx>,
) -> Vec<CollapsedRepeat<Idx>> {
    let mut clipped: Vec<(Interval<Idx>, &str)> = repeats
        .iter()
        .filter_map(|x| x.interval.clamped(bound).map(|iv| (iv, x.name.as_str())))
        .collect();
    clipped.sort_by_key(|(interval, _)| (interval.start(), interval.end()));

    let mut iter = clipped.into_iter();
    let (mut run, name) = match iter.next() {
        Some(first) => first,
        None => return Vec::new(),
    };

    let mut collapsed = Vec::new();
    let mut names = vec![name];
    for (interval, name) in iter {
        if interval.start() <= run.end() + Idx::one() {
            // Overlapping or zero-gap: the run keeps growing
            if interval.end() > run.end() {
                run = Interval::new(run.start(), interval.end()).unwrap();
            }
            names.push(name);
        } else {
            collapsed.push(CollapsedRepeat::assemble(run, &names));
            run = interval;
            names.clear();
            names.push(name);
        }
    }
    collapsed.push(CollapsedRepeat::assemble(run, &names));

    collapsed
}
