use shadow_rs::ShadowBuilder;

fn main() {
    // Exposes PKG_VERSION and CLAP_LONG_VERSION to the crate.
    ShadowBuilder::builder()
        .build()
        .expect("failed to generate shadow-rs build metadata");
}
