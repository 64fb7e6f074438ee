fn main() {
    virtual_gallery::run();
}
