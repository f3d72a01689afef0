fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile the movie service; messages also get serde so the HTTP
    // gateway can return them as JSON with lowerCamelCase keys.
    tonic_build::configure()
        .type_attribute(
            ".movie",
            "#[derive(serde::Serialize, serde::Deserialize)] #[serde(rename_all = \"camelCase\", default)]",
        )
        .compile(&["../../proto/movie.proto"], &["../../proto"])?;
    Ok(())
}
