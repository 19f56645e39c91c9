/// Helper function to seed the deck generator from JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let mut seed = 0u64;
    for _ in 0..8 {
        seed = (seed << 8) | (256. * random()) as u64;
    }
    seed
}
