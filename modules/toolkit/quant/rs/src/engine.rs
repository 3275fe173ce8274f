use eyre::Result;
use rayon::prelude::*;
use rayon::ThreadPool;

use intrex_core_rs::loc::{Interval, Region, Strand};
use intrex_core_rs::source::AlignmentSource;
use intrex_io_rs::repeats::Catalogue;

use crate::collapse::{collapse, RepeatAnnotation};
use crate::counter::{count_in_region, count_in_regions, Containment, DedupScope};
use crate::filter::FragmentFilter;
use crate::model::{Gene, Intron};
use crate::rate::RateBasis;
use crate::report::{FeatureQuant, IntronQuant, IntronRow, MaskedQuant};
use crate::segment::segment;

/// Two-phase quantification driver.
///
/// Phase one ([`Engine::library_size`]) sums overlap counts over every gene
/// region into the immutable [`RateBasis`]. Phase two ([`Engine::quantify`])
/// walks genes, their transcripts and their introns, measuring each intron,
/// its flanking exons, its collapsed repeats and its repeat-free segments
/// against that basis. Rates require a finished basis, so phase two cannot
/// start before phase one is done.
///
/// Work is spread across genes with rayon; every parallel worker clones the
/// alignment source and every counting call owns its dedup scope, so no
/// state is shared between features or threads.
pub struct Engine {
    pool: Option<ThreadPool>,
    min_mapq: u8,
    perfect_only: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            pool: None,
            min_mapq: FragmentFilter::DEFAULT_MIN_MAPQ,
            perfect_only: false,
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run counting inside the given thread pool instead of the global one.
    pub fn with_thread_pool(mut self, pool: ThreadPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn with_min_mapq(mut self, min_mapq: u8) -> Self {
        self.min_mapq = min_mapq;
        self
    }

    pub fn with_perfect_only(mut self, perfect_only: bool) -> Self {
        self.perfect_only = perfect_only;
        self
    }

    fn filter(&self, strand: Strand) -> FragmentFilter {
        FragmentFilter::new(strand)
            .with_min_mapq(self.min_mapq)
            .with_perfect_only(self.perfect_only)
    }

    /// Phase one: the genome-wide fragment total, each gene region counted
    /// once under overlap containment.
    pub fn library_size<Src>(
        &mut self,
        source: &Src,
        genes: &[Gene<String, u64>],
    ) -> Result<RateBasis>
    where
        Src: AlignmentSource<Ctg = String, Idx = u64> + Clone + Send + Sync,
    {
        match self.pool.take() {
            Some(pool) => {
                let result = pool.install(|| self._library_size(source, genes));
                self.pool = Some(pool);
                result
            }
            None => self._library_size(source, genes),
        }
    }

    fn _library_size<Src>(&self, source: &Src, genes: &[Gene<String, u64>]) -> Result<RateBasis>
    where
        Src: AlignmentSource<Ctg = String, Idx = u64> + Clone + Send + Sync,
    {
        let total = genes
            .par_iter()
            .map_init(
                || source.clone(),
                |source, gene| {
                    let filter = self.filter(*gene.region().strand());
                    let mut dedup = DedupScope::new();
                    count_in_region(
                        source,
                        gene.region(),
                        Containment::Overlap,
                        &filter,
                        &mut dedup,
                    )
                },
            )
            .try_reduce(|| 0, |a, b| Ok(a + b))?;

        log::debug!(
            "Library total: {} fragments across {} genes",
            total,
            genes.len()
        );
        Ok(RateBasis::new(total))
    }

    /// Phase two: per-intron quantification against a finished basis.
    /// Returns one row per intron (or one no-introns row per intron-less
    /// transcript), genes and transcripts in input order.
    pub fn quantify<Src>(
        &mut self,
        source: &Src,
        repeats: &Catalogue,
        genes: &[Gene<String, u64>],
        basis: &RateBasis,
    ) -> Result<Vec<IntronRow>>
    where
        Src: AlignmentSource<Ctg = String, Idx = u64> + Clone + Send + Sync,
    {
        match self.pool.take() {
            Some(pool) => {
                let result = pool.install(|| self._quantify(source, repeats, genes, basis));
                self.pool = Some(pool);
                result
            }
            None => self._quantify(source, repeats, genes, basis),
        }
    }

    fn _quantify<Src>(
        &self,
        source: &Src,
        repeats: &Catalogue,
        genes: &[Gene<String, u64>],
        basis: &RateBasis,
    ) -> Result<Vec<IntronRow>>
    where
        Src: AlignmentSource<Ctg = String, Idx = u64> + Clone + Send + Sync,
    {
        let rows = genes
            .par_iter()
            .map_init(
                || source.clone(),
                |source, gene| self.process_gene(source, repeats, gene, basis),
            )
            .collect::<Result<Vec<_>>>()?;
        Ok(rows.into_iter().flatten().collect())
    }

    fn process_gene<Src>(
        &self,
        source: &mut Src,
        catalogue: &Catalogue,
        gene: &Gene<String, u64>,
        basis: &RateBasis,
    ) -> Result<Vec<IntronRow>>
    where
        Src: AlignmentSource<Ctg = String, Idx = u64>,
    {
        let strand = *gene.region().strand();
        let filter = self.filter(strand);

        let gene_fragments = {
            let mut dedup = DedupScope::new();
            count_in_region(
                source,
                gene.region(),
                Containment::Overlap,
                &filter,
                &mut dedup,
            )?
        };

        let mut rows = Vec::new();
        for transcript in gene.transcripts() {
            let transcript_fragments = {
                let mut dedup = DedupScope::new();
                count_in_region(
                    source,
                    transcript.region(),
                    Containment::Overlap,
                    &filter,
                    &mut dedup,
                )?
            };

            let introns = transcript.introns();
            if introns.is_empty() {
                // Reported explicitly, not silently skipped
                log::debug!("Transcript {} has no introns", transcript.id());
                rows.push(IntronRow::new(
                    gene.id().clone(),
                    gene.biotype().clone(),
                    gene_fragments,
                    transcript.id().clone(),
                    transcript.biotype().clone(),
                    transcript_fragments,
                    None,
                ));
                continue;
            }

            for intron in &introns {
                let quant = self.quantify_intron(
                    source,
                    catalogue,
                    gene.region().contig(),
                    strand,
                    intron,
                    &filter,
                    basis,
                )?;
                rows.push(IntronRow::new(
                    gene.id().clone(),
                    gene.biotype().clone(),
                    gene_fragments,
                    transcript.id().clone(),
                    transcript.biotype().clone(),
                    transcript_fragments,
                    Some(quant),
                ));
            }
        }
        Ok(rows)
    }

    #[allow(clippy::too_many_arguments)]
    fn quantify_intron<Src>(
        &self,
        source: &mut Src,
        catalogue: &Catalogue,
        contig: &String,
        strand: Strand,
        intron: &Intron<u64>,
        filter: &FragmentFilter,
        basis: &RateBasis,
    ) -> Result<IntronQuant>
    where
        Src: AlignmentSource<Ctg = String, Idx = u64>,
    {
        let region = Region::new(contig.clone(), *intron.interval(), strand);

        // Intronic signal proper: fragments fully inside the intron
        let fragments = {
            let mut dedup = DedupScope::new();
            let count = count_in_region(
                source,
                &region,
                Containment::Enclosed,
                filter,
                &mut dedup,
            )?;
            FeatureQuant::new(count, basis.rate(count, region.len()))
        };

        let (upstream, downstream) = intron.flanks(strand);
        let upstream_exon = self.quant_overlap(source, &region.with_interval(upstream), filter, basis)?;
        let downstream_exon =
            self.quant_overlap(source, &region.with_interval(downstream), filter, basis)?;

        let annotations: Vec<RepeatAnnotation<u64>> = catalogue
            .fetch(contig, strand)
            .iter()
            .map(|(interval, name)| RepeatAnnotation::new(*interval, name.clone()))
            .collect();
        let collapsed = collapse(&annotations, intron.interval());

        let mut masked = Vec::with_capacity(collapsed.len());
        for repeat in &collapsed {
            let quant =
                self.quant_overlap(source, &region.with_interval(*repeat.interval()), filter, basis)?;
            masked.push(MaskedQuant::new(repeat.label(), *repeat.interval(), quant));
        }
        let repeats_total = self.quant_aggregate(
            source,
            &region,
            collapsed.iter().map(|x| *x.interval()),
            filter,
            basis,
        )?;

        let segments = segment(intron.interval(), &collapsed);
        let mut segment_quants = Vec::with_capacity(segments.len());
        for piece in &segments {
            let quant = self.quant_overlap(source, &region.with_interval(*piece), filter, basis)?;
            segment_quants.push((*piece, quant));
        }
        let segments_total =
            self.quant_aggregate(source, &region, segments.iter().copied(), filter, basis)?;

        Ok(IntronQuant::new(
            region,
            fragments,
            upstream_exon,
            downstream_exon,
            masked,
            repeats_total,
            segment_quants,
            segments_total,
        ))
    }

    /// Overlap count and rate of a single feature, with the feature length
    /// as the rate denominator.
    fn quant_overlap<Src>(
        &self,
        source: &mut Src,
        region: &Region<String, u64>,
        filter: &FragmentFilter,
        basis: &RateBasis,
    ) -> Result<FeatureQuant>
    where
        Src: AlignmentSource<Ctg = String, Idx = u64>,
    {
        let mut dedup = DedupScope::new();
        let count = count_in_region(source, region, Containment::Overlap, filter, &mut dedup)?;
        Ok(FeatureQuant::new(count, basis.rate(count, region.len())))
    }

    /// Aggregate count and rate over a family of sub-intervals sharing one
    /// dedup scope. The rate denominator is the summed sub-interval length,
    /// not the span of the parent region.
    fn quant_aggregate<Src>(
        &self,
        source: &mut Src,
        template: &Region<String, u64>,
        intervals: impl Iterator<Item = Interval<u64>>,
        filter: &FragmentFilter,
        basis: &RateBasis,
    ) -> Result<Option<FeatureQuant>>
    where
        Src: AlignmentSource<Ctg = String, Idx = u64>,
    {
        let regions: Vec<_> = intervals.map(|x| template.with_interval(x)).collect();
        if regions.is_empty() {
            return Ok(None);
        }

        let length: u64 = regions.iter().map(|x| x.len()).sum();
        let mut dedup = DedupScope::new();
        let count = count_in_regions(source, &regions, Containment::Overlap, filter, &mut dedup)?;
        Ok(Some(FeatureQuant::new(count, basis.rate(count, length))))
    }
}
