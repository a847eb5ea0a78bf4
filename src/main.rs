use devdash::app::App;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    simple_logger::init_with_level(log::Level::Warn).ok();
    let terminal = ratatui::init();
    let result = App::new().run(terminal).await;
    ratatui::restore();
    result
}
