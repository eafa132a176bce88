use ui_demo_harness::launcher;

fn main() {
    std::process::exit(launcher::run());
}
