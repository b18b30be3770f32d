use log::error;
use scanline_rasterizer::core::surface::PngSequence;
use scanline_rasterizer::io::resource_loader::ResourceLoader;
use scanline_rasterizer::io::simple_cli::SimpleCli;
use scanline_rasterizer::utils::render_process::render_animation;

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = SimpleCli::process().inspect_err(|e| error!("{}", e))?;

    let meshes = ResourceLoader::load_meshes(&settings)?;
    let mut camera = ResourceLoader::create_camera(&settings)?;
    let mut pipeline = ResourceLoader::create_pipeline(&settings)?;

    let mut surface = PngSequence::new(&settings.output_dir, &settings.output)
        .with_save_every(settings.save_every)
        .with_depth(settings.save_depth);

    render_animation(&settings, &mut pipeline, &mut camera, &meshes, &mut surface)?;
    Ok(())
}
