fn main() {
    matrix_terminal::config::load_dotenv();
    matrix_terminal::init_tracing();
    dioxus::launch(matrix_terminal::ui::App);
}
