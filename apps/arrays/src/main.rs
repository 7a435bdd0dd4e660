//! arrays entry point

#[cfg(all(debug_assertions, feature = "leak-check"))]
#[global_allocator]
static GLOBAL: arrays::leak::TrackingAllocator = arrays::leak::TrackingAllocator::new();

fn main() {
    std::process::exit(arrays::run());
}
