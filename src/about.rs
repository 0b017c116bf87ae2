pub const MYCOATLAS_DISPLAY_VERSION: &str = env!("MYCOATLAS_DISPLAY_VERSION");
pub const MYCOATLAS_BUILD_N: &str = env!("MYCOATLAS_BUILD_N");

pub fn version_cli_text() -> String {
    format!(
        "MycoAtlas {}\nBuild {}\nEducational fungal genomics atlas",
        MYCOATLAS_DISPLAY_VERSION, MYCOATLAS_BUILD_N
    )
}
