fn main() {
    toolsync::run_cli();
}
