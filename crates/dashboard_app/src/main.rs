mod platform;

fn main() -> anyhow::Result<()> {
    // Optional initial location: `#pipeline`, `pipeline` or a full URL.
    let location = std::env::args().nth(1).unwrap_or_default();
    platform::run_app(location)
}
