fn main() {
    combo_runner::game::run();
}
