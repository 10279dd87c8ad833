mod cached;

pub use cached::CachedQuarterliesRepository;
