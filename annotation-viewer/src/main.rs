fn main() -> eframe::Result {
    annotation_viewer::run_native()
}
