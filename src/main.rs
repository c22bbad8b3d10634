//! Command-line entry point for the plyview point cloud viewer.

use clap::Parser;
use plyview::{
    cli::CliArgs, error::ViewerError, gpu::adapter, options::Options, point_cloud::ply,
    viewer::Viewer,
};

fn main() {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(i32::from(e.use_stderr()));
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.default_log_filter()),
    )
    .init();

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), ViewerError> {
    if args.list_adapters {
        print_adapters();
        return Ok(());
    }

    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };

    let Some(file) = &args.file else {
        return Err(ViewerError::Viewer("no input file given".into()));
    };
    let points = ply::load(file)?;

    Viewer::builder()
        .with_points(points)
        .with_options(options)
        .with_adapter(args.device.clone())
        .build()
        .run()
}

#[allow(clippy::print_stdout)]
fn print_adapters() {
    let summaries = adapter::list_adapters(&wgpu::Instance::default());
    if summaries.is_empty() {
        println!("no GPU adapters found");
    }
    for (index, summary) in summaries.iter().enumerate() {
        println!("[{index}] {summary}");
    }
}
