c_enum! {
    /// A storage backend which the native library may have been built with.
    pub enum Filesystem {
        Hdfs = 0 => "hdfs",
        S3 = 1 => "s3",
        Azure = 2 => "azure",
        Gcs = 3 => "gcs",
        Memfs = 4 => "mem",
    }
}
