fn main() {
    atelier::config::load_dotenv();
    atelier::config::init_tracing();
    dioxus::launch(atelier::ui::App);
}
